//! BDD step definitions for the creation form

use cucumber::{then, when};

use crate::world::UpdogWorld;

#[when(expr = "I fill the form with {string} at {string} every {int} seconds")]
fn fill_form(world: &mut UpdogWorld, name: String, url: String, interval: u32) {
    let draft = world.form().draft_mut();
    draft.name = name;
    draft.url = url;
    draft.interval_seconds = interval;
}

#[when(expr = "I fill the form with name {string} and url {string}")]
fn fill_name_and_url(world: &mut UpdogWorld, name: String, url: String) {
    let draft = world.form().draft_mut();
    draft.name = name;
    draft.url = url;
}

#[when("I submit the form")]
async fn submit_form(world: &mut UpdogWorld) {
    let result = world.form().submit().await;
    world.navigation = world.record(result);
}

#[then(expr = "the draft interval is {int} seconds")]
fn draft_interval(world: &mut UpdogWorld, interval: u32) {
    assert_eq!(world.form().draft().interval_seconds, interval);
}

#[then(expr = "the created monitor is active with an interval of {int} seconds")]
fn created_monitor(world: &mut UpdogWorld, interval: u32) {
    let created = world.form().created().cloned().expect("monitor created");
    assert!(created.is_active);
    assert_eq!(created.interval_seconds, interval);
    let stored = world.service().stored(created.id).expect("stored by the service");
    assert_eq!(stored, created);
}

#[then("the form can be submitted again")]
fn can_submit_again(world: &mut UpdogWorld) {
    assert!(world.form().can_submit());
}

#[then(expr = "the form still holds {string} at {string}")]
fn form_holds(world: &mut UpdogWorld, name: String, url: String) {
    let draft = world.form().draft();
    assert_eq!(draft.name, name);
    assert_eq!(draft.url, url);
}

#[then(expr = "the form error contains {string}")]
fn form_error(world: &mut UpdogWorld, text: String) {
    let error = world.form().error().map(str::to_string);
    let error = error.expect("form shows an error");
    assert!(error.contains(&text), "{error}");
}

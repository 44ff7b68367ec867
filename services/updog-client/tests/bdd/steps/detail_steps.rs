//! BDD step definitions for the monitor detail view

use cucumber::{then, when};
use updog_client::detail::DetailState;

use crate::world::UpdogWorld;

#[when(expr = "I open {string}")]
async fn open_monitor(world: &mut UpdogWorld, name: String) {
    let id = world.monitor_id(&name);
    world.new_detail(id).load().await;
}

#[when("I toggle active")]
async fn toggle_active(world: &mut UpdogWorld) {
    let result = world.detail().toggle_active().await;
    world.record(result);
}

#[when("I start editing")]
fn start_editing(world: &mut UpdogWorld) {
    let result = world.detail().begin_edit();
    world.record(result);
}

#[when(expr = "I set the draft name to {string}")]
fn set_draft_name(world: &mut UpdogWorld, name: String) {
    world.detail().draft_mut().expect("editing").name = name;
}

#[when(expr = "I set the draft url to {string}")]
fn set_draft_url(world: &mut UpdogWorld, url: String) {
    world.detail().draft_mut().expect("editing").url = url;
}

#[when(expr = "I set the draft interval to {int} seconds")]
fn set_draft_interval(world: &mut UpdogWorld, interval: u32) {
    world.detail().draft_mut().expect("editing").interval_seconds = interval;
}

#[when("I save")]
async fn save(world: &mut UpdogWorld) {
    let result = world.detail().save().await;
    world.record(result);
}

#[when("I cancel editing")]
fn cancel_editing(world: &mut UpdogWorld) {
    let result = world.detail().cancel_edit();
    world.record(result);
}

#[when("I delete and decline the confirmation")]
async fn delete_declined(world: &mut UpdogWorld) {
    let result = world.detail().delete(&|_: &str| false).await;
    world.navigation = world.record(result).flatten();
}

#[when("I delete and confirm")]
async fn delete_confirmed(world: &mut UpdogWorld) {
    let result = world.detail().delete(&|_: &str| true).await;
    world.navigation = world.record(result).flatten();
}

#[when(expr = "I start loading {string}")]
async fn start_loading(world: &mut UpdogWorld, name: String) {
    let id = world.monitor_id(&name);
    let detail = world.new_detail(id);
    let outcome = detail.fetch(detail.ticket()).await;
    world.pending_loads.insert(name, outcome);
}

#[when(expr = "I switch to {string} before the load completes")]
async fn switch_monitor(world: &mut UpdogWorld, name: String) {
    let id = world.monitor_id(&name);
    let detail = world.detail();
    let ticket = detail.select(id);
    let outcome = detail.fetch(ticket).await;
    world.pending_loads.insert(name, outcome);
}

#[when(expr = "the load for {string} completes")]
fn load_completes(world: &mut UpdogWorld, name: String) {
    let outcome = world
        .pending_loads
        .remove(&name)
        .unwrap_or_else(|| panic!("no load pending for {name:?}"));
    let applied = world.detail().apply(outcome);
    world.last_load_applied = Some(applied);
}

#[then(expr = "the detail view is {word}")]
fn detail_state(world: &mut UpdogWorld, state: String) {
    assert_eq!(world.detail().state().name(), state);
}

#[then(expr = "the detail view is in error with {string}")]
fn detail_error(world: &mut UpdogWorld, expected: String) {
    match world.detail().state() {
        DetailState::Error { message, .. } => assert_eq!(*message, expected),
        other => panic!("expected an error state, got {other:?}"),
    }
}

#[then(expr = "the detail view shows {int} results")]
fn detail_results(world: &mut UpdogWorld, count: usize) {
    match world.detail().state() {
        DetailState::Viewing(view) => {
            assert_eq!(view.results.len(), count);
            assert!(view
                .results
                .windows(2)
                .all(|pair| pair[0].checked_at >= pair[1].checked_at));
        }
        other => panic!("expected a viewing state, got {other:?}"),
    }
}

#[then(expr = "the rendered detail contains {string}")]
fn rendered_detail_contains(world: &mut UpdogWorld, text: String) {
    let rendered = world.detail().render();
    assert!(rendered.contains(&text), "{rendered}");
}

#[then("the monitor is paused")]
fn monitor_paused(world: &mut UpdogWorld) {
    let live = world.detail().state().live().expect("monitor loaded");
    assert!(!live.is_active);
}

#[then("the monitor is active")]
fn monitor_active(world: &mut UpdogWorld) {
    let live = world.detail().state().live().expect("monitor loaded");
    assert!(live.is_active);
}

#[then(expr = "the live name is {string}")]
fn live_name(world: &mut UpdogWorld, name: String) {
    let live = world.detail().state().live().expect("monitor loaded");
    assert_eq!(live.name, name);
}

#[then(expr = "the draft is {string} at {string}")]
fn draft_is(world: &mut UpdogWorld, name: String, url: String) {
    let draft = world.detail().draft().expect("editing");
    assert_eq!(draft.name, name);
    assert_eq!(draft.url, url);
}

#[then("the stale load is discarded")]
fn stale_load_discarded(world: &mut UpdogWorld) {
    assert_eq!(world.last_load_applied, Some(false));
}

#[then("the detail view shows no monitor")]
fn shows_no_monitor(world: &mut UpdogWorld) {
    let detail = world.detail();
    assert!(detail.state().live().is_none());
    assert_eq!(detail.state().name(), "loading");
}

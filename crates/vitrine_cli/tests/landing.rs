//! Replays the bundled landing page fixture

use std::path::PathBuf;

use vitrine_app::VitrineConfig;
use vitrine_cli::doctor::{self, CheckStatus};
use vitrine_cli::fixture::Fixture;
use vitrine_cli::simulate::{self, Simulation};
use vitrine_platform::MemoryStore;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/landing.toml")
}

fn replay(until: u64) -> Simulation {
    let page = Fixture::load(&fixture_path()).unwrap().build().unwrap();
    simulate::run(page, MemoryStore::new(), VitrineConfig::default(), Some(until))
}

fn lines_at(sim: &Simulation, at: u64) -> Vec<String> {
    sim.trace
        .iter()
        .filter(|line| line.at == at)
        .map(|line| line.message.clone())
        .collect()
}

#[test]
fn test_landing_mounts_expected_widgets() {
    let sim = replay(0);
    for widget in ["theme", "nav", "smooth-scroll", "counter", "sequencer", "carousel"] {
        assert!(sim.widgets.contains(&widget), "{widget} not mounted");
    }
}

#[test]
fn test_landing_session_trace() {
    let sim = replay(12_000);
    assert_eq!(sim.ended_at, 12_000);

    let menu_open = lines_at(&sim, 400);
    assert!(menu_open.iter().any(|l| l.contains("ul.nav-menu") && l.ends_with("+.active")));

    let anchor = lines_at(&sim, 900);
    assert!(anchor.iter().any(|l| l.trim() == "scroll request 820 (smooth)"));

    // Counter starts with the first scroll and lands on its target 50 steps later
    let counted = lines_at(&sim, 2500);
    assert!(counted.iter().any(|l| l.contains("text \"120+\"")));

    // The intelligence section crosses 30% on the second scroll
    assert!(counted
        .iter()
        .any(|l| l.contains("h2.main-statement") && l.ends_with("+.animate")));

    let theme = lines_at(&sim, 5000);
    assert!(theme.iter().any(|l| l.contains("[data-theme=\"light\"]")));

    // Carousel resumes at 4000 and swaps cards at the flip midpoint
    let swap = lines_at(&sim, 10_400);
    assert!(swap.iter().any(|l| l.contains("span.indicator") && l.ends_with("+.active")));
    let settled = lines_at(&sim, 10_800);
    assert!(settled.iter().any(|l| l.ends_with("+.content-stage")));
}

#[test]
fn test_landing_doctor() {
    let page = Fixture::load(&fixture_path()).unwrap().build().unwrap();
    let checks = doctor::diagnose(page, VitrineConfig::default());

    let status = |name: &str| checks.iter().find(|c| c.name == name).unwrap().status;
    assert_eq!(status("carousel"), CheckStatus::Ok);
    assert_eq!(status("particles"), CheckStatus::Ok);
    assert_eq!(status("reveal"), CheckStatus::Warning);
    assert_eq!(status("contact-form"), CheckStatus::Warning);
    assert_eq!(status("title"), CheckStatus::NotApplicable);
}

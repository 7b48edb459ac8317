// tests/poll_core.rs

use std::path::PathBuf;

use rerun::engine::{CoreCommand, PollCore, PollState};

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[test]
fn empty_scan_stays_idle_and_does_nothing() {
    let mut core = PollCore::new("make", true);

    let step = core.on_scan(&[]);

    assert!(step.is_empty());
    assert_eq!(core.state(), PollState::Idle);
}

#[test]
fn change_moves_to_acting_then_back_to_idle() {
    let mut core = PollCore::new("make", false);

    let step = core.on_scan(&paths(&["./a.txt"]));
    assert!(!step.is_empty());
    assert_eq!(core.state(), PollState::Acting);

    core.on_action_finished();
    assert_eq!(core.state(), PollState::Idle);
}

#[test]
fn action_sequence_is_clear_print_run() {
    let mut core = PollCore::new("cargo test", false);
    core.on_scan(&[]);

    let step = core.on_scan(&paths(&["./src/lib.rs"]));

    assert_eq!(
        step.commands,
        vec![
            CoreCommand::ClearScreen,
            CoreCommand::PrintCommand("cargo test".to_string()),
            CoreCommand::RunCommand("cargo test".to_string()),
        ]
    );
}

#[test]
fn first_cycle_never_lists_files_even_when_verbose() {
    let mut core = PollCore::new("ls", true);
    assert!(core.is_first_cycle());

    let step = core.on_scan(&paths(&["./a", "./b", "./c"]));

    assert!(!core.is_first_cycle());
    assert!(
        !step
            .commands
            .iter()
            .any(|c| matches!(c, CoreCommand::PrintChangedFiles(_)))
    );
    assert!(step.commands.contains(&CoreCommand::RunCommand("ls".to_string())));
}

#[test]
fn empty_first_scan_still_ends_the_first_cycle() {
    let mut core = PollCore::new("ls", true);

    core.on_scan(&[]);
    let step = core.on_scan(&paths(&["./new.txt"]));

    assert_eq!(
        step.commands,
        vec![
            CoreCommand::ClearScreen,
            CoreCommand::PrintCommand("ls".to_string()),
            CoreCommand::PrintChangedFiles(vec!["./new.txt".to_string()]),
            CoreCommand::RunCommand("ls".to_string()),
        ]
    );
}

#[test]
fn verbose_listing_is_sorted() {
    let mut core = PollCore::new("ls", true);
    core.on_scan(&paths(&["./x"]));
    core.on_action_finished();

    let step = core.on_scan(&paths(&["./z.txt", "./a/b.txt", "./m.txt"]));

    assert!(step.commands.contains(&CoreCommand::PrintChangedFiles(vec![
        "./a/b.txt".to_string(),
        "./m.txt".to_string(),
        "./z.txt".to_string(),
    ])));
}

#[test]
fn quiet_mode_never_lists_files() {
    let mut core = PollCore::new("ls", false);
    core.on_scan(&paths(&["./x"]));
    core.on_action_finished();

    let step = core.on_scan(&paths(&["./x"]));

    assert_eq!(step.commands.len(), 3);
    assert_eq!(core.command(), "ls");
}

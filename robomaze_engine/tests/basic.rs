use std::path::PathBuf;

use re::command::{Command, parse_command};
use re::loader::levels::load_levels;
use re::loader::scoring::ScoringConfig;
use re::view::RunReport;
use re::*;
use robomaze_engine as re;
use robomaze_script::parse;

fn pack_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("packs/corridors.ron")
}

fn program_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("programs").join(name)
}

#[test]
fn test_command_parse() {
    assert!(matches!(parse_command("look"), Command::Show));
    assert!(matches!(parse_command("lvl 2"), Command::Level(2)));
}

#[test]
fn test_builtin_levels_solvable() {
    let program = parse("forward(12)\nright()\nforward(12)");
    for level in builtin_levels() {
        let outcome = level.run(&program, 100).unwrap();
        assert!(outcome.status.is_goal_reached(), "level {} not solved", level.id);
        assert_eq!(outcome.total_steps, 24);
    }
}

#[test]
fn test_shipped_programs() {
    let level = &builtin_levels()[0];
    let good = std::fs::read_to_string(program_path("level1.robo")).unwrap();
    let outcome = level.run(&parse(&good), 100).unwrap();
    assert!(outcome.success());

    let bad = std::fs::read_to_string(program_path("wall.robo")).unwrap();
    let outcome = level.run(&parse(&bad), 100).unwrap();
    assert!(outcome.status.is_blocked());
    assert_eq!(outcome.total_steps, 4);
}

#[test]
fn test_corridor_pack_solutions() {
    let levels = load_levels(&pack_path()).unwrap();
    assert_eq!(levels.len(), 2);

    let switchbacks = &levels[0];
    assert_eq!(switchbacks.effective_step_limit(100), 40);
    let program = parse(
        "forward(6)\nright()\nforward(2)\nright()\nforward(6)\nleft()\nforward(2)\nleft()\nforward(6)",
    );
    let outcome = switchbacks.run(&program, 100).unwrap();
    assert!(outcome.status.is_goal_reached());
    assert_eq!(outcome.total_steps, switchbacks.optimal_steps);

    let hook = &levels[1];
    assert_eq!(hook.facing, Facing::West);
    let outcome = hook
        .run(&parse("forward(2)\nright()\nforward(2)\nright()\nforward(2)"), 100)
        .unwrap();
    assert!(outcome.success());
    assert_eq!(outcome.total_steps, 6);
}

#[test]
fn test_report_json() {
    let level = &builtin_levels()[0];
    let program = parse("forward(12)\nright()\nforward(12)\nleft()\nleft()");
    let outcome = level.run(&program, 100).unwrap();
    let report = RunReport::new(level, &outcome, &ScoringConfig::default());
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "goal-reached");
    assert_eq!(json["steps"], 24);
    assert_eq!(json["outcome"]["final_pose"]["row"], 13);
    let log = json["outcome"]["log"].as_array().unwrap();
    assert_eq!(log.len(), 26);
    assert_eq!(log[25], "Goal reached!");
}

//! End-to-end renames over whole projects.

mod common;

use common::{action, condition, layout, parameters, platform, single_layout_project};
use evrename::project::{EventsFunction, EventsFunctionsExtension, ExternalEvents, ObjectDecl};
use evrename::{Event, NameChange, ObjectsScope, Project, find_occurrences, parse_expression, rename_in_project, splice};
use std::path::Path;

fn rename(project: &mut Project, request: &NameChange) {
    rename_in_project(project, &platform(), request);
}

#[test]
fn live_variable_references_are_never_touched() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![action(
            "SetVariableString",
            &["MyVar", r#"Concatenate("Score: ", ToString(VariableValue(Score)))"#],
        )],
    )]);
    let before = project.clone();

    rename(&mut project, &NameChange::new("objectvar", "Score", "Points").scoped_to("Score"));
    assert_eq!(project, before);

    rename(&mut project, &NameChange::new("scenevar", "Score", "Points"));
    assert_eq!(project, before);
}

#[test]
fn only_the_call_bound_to_the_scoped_object_is_renamed() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![action(
            "SetAnimationName",
            &["Player", r#"IsObjectActive("Enemy", "MyObject") && IsObjectActive("Player", "MyObject")"#],
        )],
    )]);

    rename(&mut project, &NameChange::new("animationName", "MyObject", "Renamed").scoped_to("Player"));

    assert_eq!(
        parameters(&project),
        vec![
            "Player".to_string(),
            r#"IsObjectActive("Enemy", "MyObject") && IsObjectActive("Player", "Renamed")"#.to_string(),
        ]
    );
}

#[test]
fn scoped_rename_skips_instructions_bound_to_other_objects() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![
            action("SetAnimationName", &["Enemy", r#""Run""#]),
            action("SetAnimationName", &["Player", r#""Run""#]),
        ],
    )]);

    rename(&mut project, &NameChange::new("animationName", "Run", "Sprint").scoped_to("Player"));

    assert_eq!(parameters(&project), vec!["Enemy", r#""Run""#, "Player", r#""Sprint""#]);
}

#[test]
fn independent_occurrences_are_both_replaced_and_gaps_preserved() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![action("ChangeLayer", &["Player", r#"LayerOr("UI",   "Base")+LayerOr( "Base" , "UI" )"#])],
    )]);

    rename(&mut project, &NameChange::new("layer", "UI", "HUD"));

    assert_eq!(parameters(&project)[1], r#"LayerOr("HUD",   "Base")+LayerOr( "Base" , "HUD" )"#);
}

#[test]
fn matching_is_exact_on_the_quoted_name() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![
            action("ChangeLayer", &["Player", r#""UIExtra""#]),
            action("ChangeLayer", &["Player", r#"LayerOr("UIExtra", " UI")"#]),
            action("ChangeLayer", &["Player", r#""ui""#]),
        ],
    )]);
    let before = project.clone();

    rename(&mut project, &NameChange::new("layer", "UI", "HUD"));

    assert_eq!(project, before);
}

#[test]
fn project_rename_agrees_with_find_and_splice() {
    let value = r#"LayerOr("UI", LayerTimeScale("UI") + 1)"#;
    let mut project = single_layout_project(vec![Event::standard(vec![], vec![action("ChangeLayer", &["Player", value])])]);
    let request = NameChange::new("layer", "UI", "HUD");

    rename(&mut project, &request);

    let root = parse_expression(value).unwrap();
    let found = find_occurrences(&platform(), ObjectsScope::empty(), &root, value, &request);
    let through_parser = splice(value, &found, &request.quoted_new_name());

    assert_eq!(parameters(&project)[1], through_parser);
    assert_eq!(through_parser, r#"LayerOr("HUD", LayerTimeScale("HUD") + 1)"#);
}

#[test]
fn only_an_exact_literal_parameter_is_replaced_whole() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![
            action("ChangeLayer", &["Player", r#""UI""#]),
            action("ChangeLayer", &["Player", r#"  "UI" "#]),
        ],
    )]);

    rename(&mut project, &NameChange::new("layer", "UI", "HUD"));

    assert_eq!(parameters(&project), vec!["Player", r#""HUD""#, "Player", r#"  "UI" "#]);
}

#[test]
fn renaming_twice_changes_nothing_more() {
    let events = vec![Event::standard(
        vec![condition("LayerVisible", &["", r#""UI""#])],
        vec![
            action("ChangeLayer", &["Player", r#"LayerOr("UI", LayerOr("UI", "Base"))"#]),
            action("ChangeLayer", &["Enemy", r#""UI""#]),
        ],
    )];
    let request = NameChange::new("layer", "UI", "HUD");

    let mut once = single_layout_project(events);
    rename(&mut once, &request);
    let mut twice = once.clone();
    rename(&mut twice, &request);

    assert_eq!(once, twice);
    assert!(parameters(&once).iter().all(|p| !p.contains(r#""UI""#)));
}

#[test]
fn code_only_parameters_keep_their_slot_in_instructions() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![condition("LayerVisible", &["", r#""UI""#])],
        vec![],
    )]);

    rename(&mut project, &NameChange::new("layer", "UI", "HUD"));

    assert_eq!(parameters(&project), vec!["", r#""HUD""#]);
}

#[test]
fn empty_optional_parameter_uses_its_default_value() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![condition("LayerVisible", &["", ""])],
        vec![],
    )]);

    rename(&mut project, &NameChange::new("layer", "", "Background"));

    assert_eq!(parameters(&project), vec!["", r#""Background""#]);
}

#[test]
fn behavior_functions_resolve_through_the_object_declaration() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![
            action("SetAnimationName", &["Player", r#"Player.Animator::Duration("Run")"#]),
            action("SetAnimationName", &["Enemy", r#"Enemy.Animator::Duration("Run")"#]),
        ],
    )]);

    rename(&mut project, &NameChange::new("animationName", "Run", "Sprint"));

    let values = parameters(&project);
    assert_eq!(values[1], r#"Player.Animator::Duration("Sprint")"#);
    assert_eq!(values[3], r#"Enemy.Animator::Duration("Run")"#);
}

#[test]
fn nested_events_and_sub_instructions_are_renamed() {
    let nested = Event::standard(vec![], vec![action("ChangeLayer", &["Player", r#""UI""#])]);
    let with_sub = condition("LayerVisible", &["", r#""Base""#])
        .with_sub_instruction(condition("LayerVisible", &["", r#""UI""#]));
    let mut project =
        single_layout_project(vec![Event::standard(vec![with_sub], vec![]).with_sub_event(nested)]);

    rename(&mut project, &NameChange::new("layer", "UI", "HUD"));

    assert_eq!(parameters(&project), vec!["", r#""Base""#, "", r#""HUD""#, "Player", r#""HUD""#]);
}

#[test]
fn every_events_sheet_is_visited_with_its_own_objects() {
    let frame_count = |object: &str| {
        let value = format!(r#"{object}.AnimationFrameCount("Run")"#);
        Event::standard(vec![], vec![action("SetAnimationName", &[object, value.as_str()])])
    };

    let mut project = Project {
        name: "Demo".to_string(),
        layouts: vec![layout("Level1", vec![ObjectDecl::new("Enemy", "Sprite")], vec![frame_count("Enemy")])],
        external_events: vec![
            ExternalEvents {
                name: "Shared".to_string(),
                associated_layout: "Level1".to_string(),
                events: vec![frame_count("Enemy")],
            },
            ExternalEvents {
                name: "Orphan".to_string(),
                associated_layout: "Nowhere".to_string(),
                events: vec![frame_count("Enemy")],
            },
        ],
        events_functions_extensions: vec![EventsFunctionsExtension {
            name: "Helpers".to_string(),
            events_functions: vec![EventsFunction {
                name: "Animate".to_string(),
                objects: vec![ObjectDecl::new("Target", "Sprite")],
                events: vec![frame_count("Target")],
            }],
        }],
        ..Project::default()
    };

    rename(&mut project, &NameChange::new("animationName", "Run", "Sprint"));

    assert_eq!(
        parameters(&project),
        vec![
            "Enemy",
            r#"Enemy.AnimationFrameCount("Sprint")"#,
            "Enemy",
            r#"Enemy.AnimationFrameCount("Sprint")"#,
            "Enemy",
            r#"Enemy.AnimationFrameCount("Run")"#,
            "Target",
            r#"Target.AnimationFrameCount("Sprint")"#,
        ]
    );
}

#[test]
fn rename_survives_a_json_round_trip() {
    let json = r#"{
        "name": "Demo",
        "objects": [{ "name": "Player", "type": "Sprite" }],
        "layouts": [{
            "name": "Level1",
            "events": [{
                "type": "BuiltinCommonInstructions::Standard",
                "conditions": [{ "type": "LayerVisible", "parameters": ["", "\"UI\""] }],
                "actions": [{ "type": "ChangeLayer", "parameters": ["Player", "LayerOr(\"UI\", \"Base\")"] }]
            }]
        }]
    }"#;
    let path = Path::new("game.json");
    let mut project = Project::from_json(json, path).unwrap();

    rename(&mut project, &NameChange::new("layer", "UI", "HUD"));

    let reloaded = Project::from_json(&project.to_json(path).unwrap(), path).unwrap();
    assert_eq!(parameters(&reloaded), vec!["", r#""HUD""#, "Player", r#"LayerOr("HUD", "Base")"#]);
}

#[test]
fn unknown_instructions_and_malformed_parameters_are_left_alone() {
    let mut project = single_layout_project(vec![Event::standard(
        vec![],
        vec![
            action("NotAnInstruction", &["Player", r#""UI""#]),
            action("ChangeLayer", &["Player", r#"LayerOr("UI", "#]),
            action("ChangeLayer", &["Player", r#"Mystery("UI")"#]),
        ],
    )]);
    let before = project.clone();

    rename(&mut project, &NameChange::new("layer", "UI", "HUD"));

    assert_eq!(project, before);
}

use std::fs;

mod common;

use common::{parse_json, stderr_of, stdout_of, Sandbox};

#[test]
fn ls_lists_presets_without_marker_on_fresh_home() {
    let sandbox = Sandbox::new("regm-ls");
    let output = sandbox.run(&["ls"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "{stdout}");
    assert!(lines[0].starts_with("  npm "));
    assert!(lines[3].starts_with("  npmMirror "));
    assert!(lines.iter().all(|line| !line.starts_with("* ")));
}

#[test]
fn use_marks_alias_as_current() {
    let sandbox = Sandbox::new("regm-use");
    sandbox.write_npmrc("always-auth=false\nregistry=https://old.example/\n");

    let output = sandbox.run(&["use", "yarn"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("use yarn success"));
    assert_eq!(
        sandbox.read_npmrc(),
        "always-auth=false\nregistry=https://registry.yarnpkg.com/\n"
    );

    let stdout = stdout_of(&sandbox.run(&["list"]));
    let current: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("* "))
        .collect();
    assert_eq!(current.len(), 1, "{stdout}");
    assert!(current[0].starts_with("* yarn "));

    let output = sandbox.run(&["current"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("you are using yarn (https://registry.yarnpkg.com/)"));
}

#[test]
fn current_without_selection_exits_one_with_use_hint() {
    // Deliberately non-zero: scripts can tell "nothing selected" apart from
    // a known alias.
    let sandbox = Sandbox::new("regm-current");
    let output = sandbox.run(&["current"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("no active registry configured"), "{stdout}");
    assert!(stdout.contains("regm use <alias>"), "{stdout}");

    let payload = parse_json(&sandbox.run(&["current", "--json"]));
    assert_eq!(payload["status"], "user-error");
    assert_eq!(payload["details"]["reason"], "no_active_registry");
}

#[test]
fn missing_arguments_warn_and_exit_one() {
    let sandbox = Sandbox::new("regm-args");
    for args in [&["use"][..], &["del"][..], &["add"][..], &["add", "corp"][..]] {
        let output = sandbox.run(args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert!(stdout_of(&output).contains("please supply"), "{args:?}");
        assert!(!stderr_of(&output).contains("panicked"), "{args:?}");
    }
    assert!(!sandbox.npmrc().exists());
}

#[test]
fn add_and_delete_user_alias() {
    let sandbox = Sandbox::new("regm-add");

    let output = sandbox.run(&["add", "corp", "https://registry.corp.example/"]);
    assert!(output.status.success(), "{}", stdout_of(&output));
    assert_eq!(
        fs::read_to_string(sandbox.alias_dir().join("corp")).expect("alias file"),
        "https://registry.corp.example/\n"
    );

    let output = sandbox.run(&["add", "corp", "https://other.example/"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("RG110"));

    let stdout = stdout_of(&sandbox.run(&["ls"]));
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout
        .lines()
        .last()
        .unwrap_or_default()
        .starts_with("  corp "));

    let output = sandbox.run(&["rm", "npm"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("RG111"));

    assert!(sandbox.run(&["del", "corp"]).status.success());
    assert!(!sandbox.alias_dir().join("corp").exists());

    let output = sandbox.run(&["use", "corp"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("can't find alias 'corp'"));
}

#[test]
fn add_with_blank_or_multiline_uri_leaves_no_file() {
    let sandbox = Sandbox::new("regm-add-bad-uri");

    for args in [
        &["add", "corp", "", "https://corp.example/"][..],
        &["add", "corp", "https://registry.corp.example/\nnpm/"][..],
    ] {
        let output = sandbox.run(args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert!(stdout_of(&output).contains("RG102"), "{args:?}");
    }
    assert!(!sandbox.alias_dir().join("corp").exists());

    let output = sandbox.run(&["add", "corp", "https://registry.corp.example/"]);
    assert!(output.status.success(), "{}", stdout_of(&output));
}

#[test]
fn user_alias_cannot_shadow_preset_uri() {
    let sandbox = Sandbox::new("regm-shadow");
    sandbox.write_alias("npm", "https://shadow.example/\n");

    assert!(sandbox.run(&["use", "npm"]).status.success());
    assert_eq!(
        sandbox.read_npmrc(),
        "registry=https://registry.npmjs.org/\n"
    );
}

#[test]
fn json_envelope_carries_registries() {
    let sandbox = Sandbox::new("regm-json");
    sandbox.write_alias(
        "corp",
        "https://registry.corp.example/\nhttps://corp.example/\n",
    );

    let output = sandbox.run(&["--json", "ls"]);
    assert!(output.status.success());
    let payload = parse_json(&output);
    assert_eq!(payload["status"], "ok");
    let registries = payload["details"]["registries"]
        .as_array()
        .expect("registries array");
    assert_eq!(registries.len(), 5);
    assert_eq!(registries[4]["alias"], "corp");
    assert_eq!(registries[4]["preset"], false);

    let output = sandbox.run(&["use", "ghost", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let payload = parse_json(&output);
    assert_eq!(payload["status"], "user-error");
    assert_eq!(payload["details"]["code"], "RG201");
}

#[test]
fn quiet_suppresses_output_but_keeps_exit_status() {
    let sandbox = Sandbox::new("regm-quiet");
    let output = sandbox.run(&["-q", "use", "ghost"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

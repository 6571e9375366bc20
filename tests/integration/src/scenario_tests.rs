//! Scenario tests across resolution, the store and persistence
//!
//! Each test drives the public API the way the `codec` binary does: build
//! defaults, load a config tree with command-line overrides, then save.

use codec_settings::{CliOverrides, Defaults, SavePlan, Settings, Tier, Value, Warning, coerce};
use codec_test_utils::ConfigTree;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn defaults_for(tree: &ConfigTree) -> Defaults {
    Defaults::builtin_in(tree.root()).with("ConfigFile", tree.path(".codecfile").as_str())
}

// =============================================================================
// Coercion
// =============================================================================

#[rstest]
#[case("42", Value::Integer(42))]
#[case("yes", Value::Boolean(true))]
#[case("a,b,3", Value::Sequence(vec![Value::from("a"), Value::from("b"), Value::Integer(3)]))]
#[case("", Value::Null)]
#[case("none", Value::Null)]
fn coercion_examples(#[case] raw: &str, #[case] expected: Value) {
    assert_eq!(coerce(raw), expected);
}

// =============================================================================
// Precedence
// =============================================================================

#[rstest]
#[case::cli_wins(Some("DEBUG"), Some("ERR"), "ERR", Tier::Cli)]
#[case::file_wins_over_absent_cli(Some("DEBUG"), None, "DEBUG", Tier::File)]
#[case::default_when_unset(None, None, "INFO", Tier::Default)]
#[case::cli_over_default(None, Some("WARN"), "WARN", Tier::Cli)]
fn precedence_across_tiers(
    #[case] file: Option<&str>,
    #[case] cli: Option<&str>,
    #[case] expected: &str,
    #[case] tier: Tier,
) {
    let content = file.map(|v| format!("Verbosity = {v}\n")).unwrap_or_default();
    let tree = ConfigTree::new().file(".codecfile", &content);
    let overrides = CliOverrides::new().with("Verbosity", cli.map(Value::from));

    let settings = Settings::load(defaults_for(&tree), &overrides);

    let setting = settings.setting("Verbosity").unwrap();
    assert_eq!(setting.value, Some(Value::from(expected)));
    assert_eq!(setting.tier, tier);
}

#[test]
fn scenario_file_wins_over_null_cli() {
    let tree = ConfigTree::new().file(".codecfile", "TargetDirectories = /a,/b\nVerbosity = DEBUG\n");
    let overrides = CliOverrides::new().with("Verbosity", Some(Value::Null));

    let settings = Settings::load(defaults_for(&tree), &overrides);

    assert_eq!(settings.get("Verbosity"), Some(&Value::from("DEBUG")));
    assert_eq!(
        settings.get("TargetDirectories"),
        Some(&Value::Sequence(vec![Value::from("/a"), Value::from("/b")]))
    );
}

// =============================================================================
// Cycle safety
// =============================================================================

#[test]
fn mutual_imports_terminate_with_warning() {
    let tree = ConfigTree::new()
        .file(".codecfile", "configfile = a.cfg\n")
        .file("a.cfg", "configfile = b.cfg\nFilters = from-a\n")
        .file("b.cfg", "configfile = a.cfg\nIgnoredFilters = from-b\n");

    let settings = Settings::load(defaults_for(&tree), &CliOverrides::new());

    assert_eq!(settings.get("Filters"), Some(&Value::from("from-a")));
    assert_eq!(settings.get("IgnoredFilters"), Some(&Value::from("from-b")));
    assert_eq!(
        settings.warnings(),
        &[Warning::CircularImport {
            path: tree.path("a.cfg")
        }]
    );
}

#[test]
fn independent_loads_do_not_share_history() {
    let tree = ConfigTree::new()
        .file(".codecfile", "configfile = team.cfg\n")
        .file("team.cfg", "JobCount = 3\n");

    let first = Settings::load(defaults_for(&tree), &CliOverrides::new());
    let second = Settings::load(defaults_for(&tree), &CliOverrides::new());

    assert_eq!(first.get("JobCount"), Some(&Value::Integer(3)));
    assert_eq!(second.get("JobCount"), Some(&Value::Integer(3)));
    assert!(second.warnings().is_empty());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn unchanged_round_trip_is_byte_identical() {
    let content = "\
# Project settings
TargetDirectories = /src, /tests  # both trees
configfile = team.cfg

Verbosity = DEBUG
RegexFilters = a\\=b\\,c
# trailing notes
";
    let tree = ConfigTree::new()
        .file(".codecfile", content)
        .file("team.cfg", "# shared\nLogType = TXT\nVerbosity = WARN\n");

    let settings = Settings::load(defaults_for(&tree), &CliOverrides::new());
    let plan = settings.save(&tree.path(".codecfile")).unwrap();

    assert!(!plan.has_changes(), "{}", plan.diff());
    assert_eq!(tree.read(".codecfile"), content);
    assert_eq!(tree.read("team.cfg"), "# shared\nLogType = TXT\nVerbosity = WARN\n");
}

#[test]
fn default_value_is_never_written() {
    let tree = ConfigTree::new().file(".codecfile", "LogType = HTML\nJobCount = 2\n");
    let overrides = CliOverrides::new().with("LogType", Some(Value::from("CONSOLE")));

    let settings = Settings::load(defaults_for(&tree), &overrides);
    settings.save(&tree.path(".codecfile")).unwrap();

    assert_eq!(tree.read(".codecfile"), "JobCount = 2\n");
}

#[test]
fn removal_from_import_becomes_local_override() {
    let tree = ConfigTree::new()
        .file(".codecfile", "configfile = team.cfg\nJobCount = 2\n")
        .file("team.cfg", "LogType = HTML\n");
    let overrides = CliOverrides::new().with("LogType", Some(Value::from("CONSOLE")));

    let settings = Settings::load(defaults_for(&tree), &overrides);
    let plan = settings.save(&tree.path(".codecfile")).unwrap();

    assert_eq!(plan.overridden, vec!["LogType"]);
    assert_eq!(tree.read("team.cfg"), "LogType = HTML\n");
    assert_eq!(
        tree.read(".codecfile"),
        "configfile = team.cfg\nJobCount = 2\nLogType = CONSOLE\n"
    );

    let reloaded = Settings::load(defaults_for(&tree), &CliOverrides::new());
    assert_eq!(reloaded.get("LogType"), Some(&Value::from("CONSOLE")));
}

#[test]
fn interactive_fill_then_save() {
    let tree = ConfigTree::new().file(".codecfile", "# owner goes here\n");
    let mut settings = Settings::load(defaults_for(&tree), &CliOverrides::new());

    let missing = settings.ensure_keys(["Owner", "Verbosity"]);
    assert_eq!(missing, vec!["Owner"]);
    settings.assign("Owner", coerce("release team"));

    let plan = SavePlan::compute(&settings, &tree.path(".codecfile"));
    assert_eq!(plan.written, vec!["Owner"]);
    plan.apply().unwrap();

    assert_eq!(tree.read(".codecfile"), "# owner goes here\nOwner = release team\n");
}

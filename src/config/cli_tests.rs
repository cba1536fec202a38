use super::cli::{parse, CliError};
use super::types::{Section, Value};

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn default_section(line: &str) -> Section<'static> {
    parse(&args(line)).expect(line).remove("default").unwrap()
}

fn value(line: &str, key: &str) -> Value {
    default_section(line).get(key).expect(key).value.clone()
}

fn list(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn single_value_flag() {
    assert_eq!(value("-d Hallo", "TargetDirectories"), list(&["Hallo"]));
}

#[test]
fn fused_short_form_is_identical() {
    assert_eq!(value("-dHallo", "TargetDirectories"), list(&["Hallo"]));
}

#[test]
fn greedy_multi_value_consumption() {
    assert_eq!(
        value("-d Hallo Welt", "TargetDirectories"),
        list(&["Hallo", "Welt"])
    );
}

#[test]
fn fused_form_prefers_longest_flag() {
    // -fdx is FlatDirectories with "x", not Filters with "dx".
    let section = default_section("-fdx");
    assert_eq!(section.get("FlatDirectories").unwrap().value, list(&["x"]));
    assert!(section.get("Filters").is_none());
}

#[test]
fn short_and_long_forms() {
    assert_eq!(value("-l TXT", "LogType"), list(&["TXT"]));
    assert_eq!(value("--log CONSOLE", "LogType"), list(&["CONSOLE"]));
    assert_eq!(value("--verbose WARN", "Verbosity"), list(&["WARN"]));
}

#[test]
fn same_key_twice_last_wins() {
    assert_eq!(value("-l TXT --log CONSOLE", "LogType"), list(&["CONSOLE"]));
}

#[test]
fn config_file_is_a_scalar_path() {
    assert_eq!(
        value("-c /home/fabian/alt.scourrc", "ConfigFile"),
        Value::Str("/home/fabian/alt.scourrc".into())
    );
}

#[test]
fn save_flag_alone_is_true() {
    assert_eq!(value("-s", "Save"), Value::Bool(true));
}

#[test]
fn save_with_value_is_a_path() {
    assert_eq!(value("-s Hallo", "Save"), Value::Str("Hallo".into()));
}

#[test]
fn job_count_is_an_integer() {
    assert_eq!(value("-j 4", "JobCount"), Value::Int(4));
}

#[test]
fn unsupplied_keys_are_absent() {
    let section = default_section("-d Hallo");
    assert!(section.get("IgnoredDirectories").is_none());
    assert!(section.get("Save").is_none());
    assert_eq!(section.len(), 1);
}

#[test]
fn full_combined_invocation() {
    let section = default_section(
        "-d a b -id c -fd d -t .e -it .f -f g -if h -rf i -l TXT -o j -v ERR -c k -s -j 5",
    );
    assert_eq!(section.get("TargetDirectories").unwrap().value, list(&["a", "b"]));
    assert_eq!(section.get("IgnoredDirectories").unwrap().value, list(&["c"]));
    assert_eq!(section.get("FlatDirectories").unwrap().value, list(&["d"]));
    assert_eq!(section.get("TargetFileTypes").unwrap().value, list(&[".e"]));
    assert_eq!(section.get("IgnoredFileTypes").unwrap().value, list(&[".f"]));
    assert_eq!(section.get("Filters").unwrap().value, list(&["g"]));
    assert_eq!(section.get("IgnoredFilters").unwrap().value, list(&["h"]));
    assert_eq!(section.get("RegexFilters").unwrap().value, list(&["i"]));
    assert_eq!(section.get("LogType").unwrap().value, list(&["TXT"]));
    assert_eq!(section.get("LogOutput").unwrap().value, list(&["j"]));
    assert_eq!(section.get("Verbosity").unwrap().value, list(&["ERR"]));
    assert_eq!(section.get("ConfigFile").unwrap().value, Value::Str("k".into()));
    // -s immediately followed by another flag: presence alone means true.
    assert_eq!(section.get("Save").unwrap().value, Value::Bool(true));
    assert_eq!(section.get("JobCount").unwrap().value, Value::Int(5));
}

#[test]
fn missing_required_value_fails() {
    assert_eq!(
        parse(&args("-d")).unwrap_err(),
        CliError::MissingValue { flag: "-d".into() }
    );
}

#[test]
fn domain_violations_fail() {
    assert!(matches!(
        parse(&args("-l SOMETHING")).unwrap_err(),
        CliError::InvalidChoice { .. }
    ));
    assert!(matches!(
        parse(&args("-v SOMETHING")).unwrap_err(),
        CliError::InvalidChoice { .. }
    ));
}

#[test]
fn extra_value_for_single_arity_flag_fails() {
    assert_eq!(
        parse(&args("-l TXT HTML")).unwrap_err(),
        CliError::UnrecognizedToken("HTML".into())
    );
    assert_eq!(
        parse(&args("-c b a")).unwrap_err(),
        CliError::UnrecognizedToken("a".into())
    );
}

#[test]
fn non_numeric_job_count_fails() {
    assert!(matches!(
        parse(&args("-j h")).unwrap_err(),
        CliError::InvalidNumber { .. }
    ));
}

#[test]
fn empty_argument_list_fails() {
    assert_eq!(parse(&[]).unwrap_err(), CliError::NoArguments);
}

#[test]
fn stray_token_fails() {
    assert_eq!(
        parse(&args("WEIRD")).unwrap_err(),
        CliError::UnrecognizedToken("WEIRD".into())
    );
}

// tests/cli_tests.rs

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn where_lang() -> Command {
    let mut cmd = cargo_bin_cmd!("where-lang");
    cmd.env_remove("WHERE_MAX_DEPTH")
        .env_remove("WHERE_MAX_TERMS")
        .env_remove("WHERE_MAX_LENGTH")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// check
// ============================================================================

#[test]
fn check_valid_expression() {
    where_lang()
        .args(["check", "(a=1|b=2)&c=3"])
        .assert()
        .success()
        .stdout("Syntax is valid\n");
}

#[test]
fn check_json() {
    where_lang()
        .args(["check", "--json", "a=1"])
        .assert()
        .success()
        .stdout("{\"field\":\"a\",\"operator\":\"eq\",\"rhs\":{\"value\":1},\"type\":\"comparison\"}\n");
}

#[test]
fn check_pretty_json() {
    where_lang()
        .args(["check", "--pretty", "start<end"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"rhs\": {\n    \"field\": \"end\"\n  },"));
}

#[test]
fn check_canonical() {
    where_lang()
        .args(["check", "--canonical", " ( a = 1 ) & !( b ~* \"x\" | c = null ) "])
        .assert()
        .success()
        .stdout("a=1&!(b~*\"x\"|c=null)\n");
}

#[test]
fn check_canonical_conflicts_with_json() {
    where_lang()
        .args(["check", "--canonical", "--json", "a=1"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn check_reads_stdin() {
    where_lang()
        .args(["check", "--canonical"])
        .write_stdin("a = 1 | b = 2\n")
        .assert()
        .success()
        .stdout("a=1|b=2\n");
}

#[test]
fn check_syntax_error() {
    where_lang()
        .args(["check", "a=(1"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("syntax error at offset 4: expected ')', found end of input\n");
}

#[test]
fn check_lex_error() {
    where_lang()
        .args(["check", "a=$"])
        .assert()
        .code(1)
        .stderr("lex error at offset 2: unexpected character '$'\n");
}

#[test]
fn check_max_depth_flag() {
    where_lang()
        .args(["check", "--max-depth", "1", "((a=1))"])
        .assert()
        .code(1)
        .stderr("limit error at offset 2: nesting depth exceeds limit of 1\n");
}

#[test]
fn check_max_terms_flag() {
    where_lang()
        .args(["check", "--max-terms", "2", "a=1&b=2&c=3"])
        .assert()
        .code(1)
        .stderr("limit error at offset 8: expression has more than 2 terms\n");
}

#[test]
fn check_long_chain_within_default_limits() {
    let chain = vec!["id=1"; 200].join("|");
    where_lang()
        .args(["check", chain.as_str()])
        .assert()
        .success()
        .stdout("Syntax is valid\n");
}

#[test]
fn check_max_length_from_env() {
    where_lang()
        .env("WHERE_MAX_LENGTH", "3")
        .args(["check", "a=10"])
        .assert()
        .code(1)
        .stderr("limit error at offset 3: input length 4 exceeds limit of 3 bytes\n");
}

// ============================================================================
// tokens
// ============================================================================

#[test]
fn tokens_lists_offsets_and_kinds() {
    where_lang()
        .args(["tokens", "a>=1"])
        .assert()
        .success()
        .stdout("   0  identifier  a\n   1  operator    >=\n   3  number      1\n   4  eof\n");
}

#[test]
fn tokens_lex_error() {
    where_lang()
        .args(["tokens", "a=\"open"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unterminated string"));
}

// ============================================================================
// docs
// ============================================================================

#[test]
fn docs_lists_topics() {
    where_lang()
        .arg("docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("grammar"))
        .stdout(predicate::str::contains("operators"))
        .stdout(predicate::str::contains("errors"));
}

#[test]
fn doc_topic_by_alias() {
    where_lang()
        .args(["doc", "ops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPARISON OPERATORS"));
}

#[test]
fn doc_unknown_topic() {
    where_lang()
        .args(["doc", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown topic: 'nope'"));
}

// ============================================================================
// logging
// ============================================================================

#[test]
fn verbose_logs_to_stderr_only() {
    where_lang()
        .args(["--verbose", "check", "a=1"])
        .assert()
        .success()
        .stdout("Syntax is valid\n")
        .stderr(predicate::str::contains("parsed filter"));
}

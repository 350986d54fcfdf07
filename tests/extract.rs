use std::collections::HashMap;

use uri_template_full::UriTemplate;

#[track_caller]
fn check_extract(template: &str, input: &str, expected: &[(&str, &str)]) {
    let t = UriTemplate::new(template);
    let found = t
        .extract(input)
        .unwrap_or_else(|| panic!("failed to extract: template = `{t}`, input = `{input}`"));
    let expected: HashMap<String, String> = expected
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(found, expected, "template = `{t}`, input = `{input}`");
}

#[track_caller]
fn check_not_match(template: &str, input: &str) {
    let t = UriTemplate::new(template);
    assert!(
        t.extract(input).is_none(),
        "expect not match, template = `{t}`, input = `{input}`"
    );
}

#[test]
fn literal_only() {
    check_extract("http://a/", "http://a/", &[]);
    check_not_match("http://a/", "http://a/b");
    check_not_match("http://a/", "http://a");
    check_not_match("http://a/", "");
}

#[test]
fn simple_variable() {
    check_extract(
        "http://example.com/{file}",
        "http://example.com/test.txt",
        &[("file", "test.txt")],
    );
    check_extract("http://a/{b}/c", "http://a/xxx/c", &[("b", "xxx")]);
    check_extract("{x}/{y}", "1024/768", &[("x", "1024"), ("y", "768")]);
}

#[test]
fn simple_variable_rejects_delimiters() {
    // the unreserved class cannot span a path separator
    check_not_match("http://a/{b}/c", "http://a/x/y/c");
    check_not_match("http://a/{b}", "http://a/x/y");
    check_not_match("{x}", "a b");
}

#[test]
fn simple_variable_requires_one_character() {
    check_not_match("http://a/{b}", "http://a/");
}

#[test]
fn captures_are_percent_decoded() {
    check_extract("/{x}", "/a%20b", &[("x", "a b")]);
    check_extract("/{x}", "/%E3%81%82", &[("x", "あ")]);
    check_extract("/{x}", "/%2525", &[("x", "%25")]);
}

#[test]
fn invalid_percent_sequences_do_not_match() {
    // decodes to bytes that are not UTF-8
    check_not_match("/{x}", "/%F8%28");
    check_not_match("/{x}", "/%C0%A0");
}

#[test]
fn marked_expressions_match_any_text() {
    check_extract("http://a/{+b}/c", "http://a/x/y/c", &[("b", "x/y")]);
    check_extract("http://a/{+b}", "http://a/x/y", &[("b", "x/y")]);
    // the capture keeps the operator's prefix text
    check_extract("/p{#frag}", "/p#x", &[("frag", "#x")]);
    check_extract("/s{?q}", "/s?q=rust", &[("q", "?q=rust")]);
    check_extract("/s{?q}", "/s", &[("q", "")]);
}

#[test]
fn repeated_name_keeps_last_capture() {
    check_extract("{a}/{a}", "x/y", &[("a", "y")]);
    check_extract("{a}-{b}-{a}", "1-2-3", &[("a", "3"), ("b", "2")]);
}

#[test]
fn multi_variable_expression_binds_first_name_only() {
    // one capture per expression: names past the first go unbound
    check_extract("{x,y}", "val", &[("x", "val")]);
    check_extract("/{a}/{b,c}", "/1/2", &[("a", "1"), ("b", "2")]);
}

#[test]
fn unbalanced_braces_match_literally() {
    check_extract("http://a/{b", "http://a/{b", &[]);
    check_not_match("http://a/{b", "http://a/x");
}

#[test]
fn whole_string_anchoring() {
    check_not_match("{file}", "a/b");
    check_not_match("a{file}", "xa-file");
    check_not_match("{file}b", "file-bx");
}

use nuclear_mux::{CompiledPattern, Error};

fn compile(template: &str) -> CompiledPattern {
    match CompiledPattern::compile(template) {
        Ok(p) => p,
        Err(e) => panic!("{}", e),
    }
}

#[test]
fn template_trailing_slash_is_optional() {
    let cases: &[(&str, &[&str], &[&str])] = &[
        ("/", &["", "/"], &["/a", "//"]),
        ("/users", &["/users", "/users/"], &["/users/123", "/user", "/usersx"]),
        ("/users/", &["/users", "/users/"], &["/users/123"]),
        ("/users/{id}", &["/users/1", "/users/1/"], &["/users", "/users/", "/users/1/2"]),
        ("/static/{*}", &["/static/", "/static/a/b", "/static/a/b/"], &["/static"]),
    ];

    for &(template, hits, misses) in cases {
        let p = compile(template);
        for path in hits {
            assert!(p.is_match(path), "{} should match {}", template, path);
        }
        for path in misses {
            assert!(!p.is_match(path), "{} should not match {}", template, path);
        }
    }
}

#[test]
fn template_typed_params() {
    let p = compile("/posts/{year:\\d{4}}/{slug:[^/]+}");
    assert_eq!(p.param_names().collect::<Vec<_>>(), ["year", "slug"]);

    let caps = p.captures("/posts/2023/my-post").unwrap();
    assert_eq!(&*caps, &[("year", "2023"), ("slug", "my-post")]);

    assert!(p.captures("/posts/23/my-post").is_none());
    assert!(p.captures("/posts/abcd/my-post").is_none());
}

#[test]
fn template_wildcard() {
    let p = compile("/static/{*}");
    assert!(p.has_wildcard());

    assert_eq!(p.captures("/static/").unwrap().get("*"), Some(""));
    assert_eq!(p.captures("/static/a/b.css").unwrap().get("*"), Some("a/b.css"));
    assert_eq!(p.captures("/static/a/b/").unwrap().get("*"), Some("a/b"));
    assert!(p.captures("/static").is_none());

    let p = compile("/files/{*:.*\\.(css|js|png|jpg)}");
    assert_eq!(p.captures("/files/a/b.png").unwrap().get("*"), Some("a/b.png"));
    assert!(p.captures("/files/a/b.gif").is_none());

    let p = compile("/greedy/{*:.*}");
    assert_eq!(p.captures("/greedy/a/b/").unwrap().get("*"), Some("a/b"));

    let p = compile("/static/{*}/");
    assert_eq!(p.template(), "/static/{*}");
    assert_eq!(p.captures("/static/x/").unwrap().get("*"), Some("x"));
}

#[test]
fn template_literals_are_escaped() {
    let p = compile("/v1.0/a+b/(x)");
    assert!(p.is_match("/v1.0/a+b/(x)"));
    assert!(!p.is_match("/v1x0/aab/x"));
}

#[test]
fn template_shape() {
    let p = compile("/users/{id}/posts/");
    assert_eq!(p.template(), "/users/{id}/posts");
    assert_eq!(p.depth(), 4);
    assert_eq!(p.first_param(), Some(7));
    assert!(!p.has_wildcard());

    let p = compile("/users");
    assert_eq!(p.depth(), 1);
    assert_eq!(p.first_param(), None);
}

#[test]
fn template_substitution_round_trip() {
    let cases: &[(&str, &str)] = &[
        ("/users/{id}", "/users/42"),
        ("/posts/{year:\\d{4}}/{slug}", "/posts/2020/hello-world/"),
        ("/a/{x}-{y}/b", "/a/left-right/b"),
        ("/static/{*}", "/static/css/site.css"),
    ];

    for &(template, path) in cases {
        let p = compile(template);
        let caps = p.captures(path).unwrap();

        let mut rebuilt = p.template().to_owned();
        for &(name, value) in caps.iter() {
            let start = rebuilt.find('{').unwrap();
            let mut level = 0;
            let mut end = start;
            for (i, c) in rebuilt[start..].char_indices() {
                match c {
                    '{' => level += 1,
                    '}' => {
                        level -= 1;
                        if level == 0 {
                            end = start + i;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            assert!(rebuilt[start + 1..end].trim().starts_with(name));
            rebuilt.replace_range(start..=end, value);
        }

        assert!(p.is_match(&rebuilt), "{} should match {}", template, rebuilt);
    }
}

#[test]
fn template_errors() {
    let err = |t: &str| CompiledPattern::compile(t).unwrap_err();

    assert!(matches!(err(""), Error::EmptyTemplate));
    assert!(matches!(err("/a/{ }"), Error::EmptyParamName(_)));
    assert!(matches!(err("/a/{b}/{b}"), Error::DuplicateParam { .. }));
    assert!(matches!(err("/a/{b"), Error::UnbalancedBraces(_)));
    assert!(matches!(err("/a/{b:[0-9}"), Error::InvalidRegex { .. }));

    let msg = err("/a/{b}/{b}").to_string();
    assert!(msg.contains("\"b\""), "{}", msg);
}

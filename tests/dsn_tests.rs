use snippetbox::{Dsn, SnippetboxError};

#[test]
fn default_port_omits_endpoint_segment() {
    let dsn = Dsn::default();
    assert_eq!(
        dsn.to_string(),
        "web:pass@/snippetbox?charset=utf8mb4&parseTime=true"
    );
}

#[test]
fn non_default_port_includes_endpoint_segment() {
    let dsn = Dsn {
        port: "3307".to_string(),
        ..Dsn::default()
    };
    assert_eq!(
        dsn.to_string(),
        "web:pass@tcp(localhost:3307)/snippetbox?charset=utf8mb4&parseTime=true"
    );
}

#[test]
fn endpoint_branch_follows_port_not_host() {
    // A non-default host alone does not force the long form; the branch is
    // driven by the port.
    let dsn = Dsn {
        host: "db.internal".to_string(),
        ..Dsn::default()
    };
    assert_eq!(
        dsn.to_string(),
        "web:pass@/snippetbox?charset=utf8mb4&parseTime=true"
    );
}

#[test]
fn parse_short_form_applies_endpoint_defaults() {
    let dsn = Dsn::parse("web:pass@/snippetbox?charset=utf8mb4&parseTime=true").unwrap();
    assert_eq!(dsn, Dsn::default());
}

#[test]
fn parse_long_form_reads_endpoint() {
    let dsn =
        Dsn::parse("root:secret@tcp(db.internal:3310)/prod?charset=utf8&parseTime=false").unwrap();
    assert_eq!(dsn.user, "root");
    assert_eq!(dsn.password, "secret");
    assert_eq!(dsn.host, "db.internal");
    assert_eq!(dsn.port, "3310");
    assert_eq!(dsn.name, "prod");
    assert_eq!(dsn.charset, "utf8");
    assert_eq!(dsn.parse_time, "false");
}

#[test]
fn parse_without_credentials_uses_defaults() {
    let dsn = Dsn::parse("/snippetbox").unwrap();
    assert_eq!(dsn.user, "web");
    assert_eq!(dsn.password, "pass");
    assert_eq!(dsn.name, "snippetbox");
}

#[test]
fn parse_host_only_endpoint_keeps_default_port() {
    let dsn = Dsn::parse("web:pass@tcp(db.internal)/snippetbox").unwrap();
    assert_eq!(dsn.host, "db.internal");
    assert_eq!(dsn.port, "3306");
}

#[test]
fn parse_ignores_unrecognized_parameters() {
    let dsn = Dsn::parse("web:pass@/snippetbox?charset=utf8mb4&timeout=30s").unwrap();
    assert_eq!(dsn.charset, "utf8mb4");
}

#[test]
fn parse_rejects_malformed_descriptors() {
    for input in [
        "",
        "   ",
        "web:pass@tcp(localhost:3307)",
        "web:pass@tcp(localhost:3307)/",
        "web:pass@udp(localhost:3307)/snippetbox",
        "web:pass@tcp(:3307)/snippetbox",
        ":pass@/snippetbox",
        "web:pass@/snippetbox?charset",
    ] {
        let err = Dsn::parse(input).expect_err(input);
        assert!(
            matches!(err, SnippetboxError::InvalidDsn(_)),
            "unexpected error for {input:?}: {err}"
        );
    }
}

#[test]
fn formatted_descriptor_parses_back() {
    let dsn = Dsn {
        port: "3310".to_string(),
        ..Dsn::default()
    };
    assert_eq!(Dsn::parse(&dsn.to_string()).unwrap(), dsn);
}

#[test]
fn connect_options_require_numeric_port() {
    let dsn = Dsn {
        port: "lots".to_string(),
        ..Dsn::default()
    };
    assert!(matches!(
        dsn.connect_options(),
        Err(SnippetboxError::InvalidDsn(_))
    ));
    assert!(Dsn::default().connect_options().is_ok());
}

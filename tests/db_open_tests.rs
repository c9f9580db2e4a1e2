use snippetbox::{Dsn, SnippetboxError};

#[tokio::test]
#[ignore = "needs a network stack with nothing listening on the target port"]
async fn open_fails_cleanly_when_the_server_is_unreachable() {
    let dsn = Dsn {
        host: "127.0.0.1".to_string(),
        port: "1".to_string(),
        ..Dsn::default()
    };

    let err = snippetbox::db::open(&dsn)
        .await
        .expect_err("open must fail against a dead endpoint");
    assert!(matches!(err, SnippetboxError::Database(_)), "{err}");
}

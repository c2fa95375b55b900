use lantern::http::response::Reply;
use lantern::http::writer::{ResponseWriter, serialize_reply};

fn as_text(reply: &Reply) -> String {
    String::from_utf8(serialize_reply(reply).to_vec()).unwrap()
}

#[test]
fn test_text_reply_framing() {
    let text = as_text(&Reply::text(200, "hello"));

    assert_eq!(
        text,
        "HTTP/1.1 200 OK\r\n\
         Content-Type: text/plain; charset=UTF-8\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS\r\n\
         Access-Control-Allow-Headers: Content-Type\r\n\
         Content-Length: 5\r\n\
         \r\n\
         hello"
    );
}

#[test]
fn test_file_reply_omits_cors() {
    let text = as_text(&Reply::file(b"body{}".to_vec(), "text/css"));

    assert_eq!(
        text,
        "HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nContent-Length: 6\r\n\r\nbody{}"
    );
}

#[test]
fn test_content_length_counts_bytes_not_chars() {
    let text = as_text(&Reply::text(200, "ñandú"));

    assert!(text.contains("Content-Length: 7\r\n"));
}

#[test]
fn test_unknown_status_reason() {
    let text = as_text(&Reply::text(799, ""));

    assert!(text.starts_with("HTTP/1.1 799 Unknown Status\r\n"));
    assert!(text.ends_with("Content-Length: 0\r\n\r\n"));
}

#[test]
fn test_binary_body_is_verbatim() {
    let body = vec![0u8, 159, 146, 150, 255];
    let bytes = serialize_reply(&Reply::file(body.clone(), "image/png"));

    assert!(bytes.ends_with(&body));
}

#[tokio::test]
async fn test_writer_writes_everything() {
    let reply = Reply::text(404, "Not Found");
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&reply);
    writer.write_to_stream(&mut out).await.unwrap();

    assert_eq!(out, serialize_reply(&reply).to_vec());
}

use serde::{Deserialize, Serialize};

/// Body returned when a prediction is queued.
#[derive(Debug, Clone, Deserialize)]
pub struct EventIdResponse {
    pub event_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileMeta {
    #[serde(rename = "_type")]
    pub kind: String,
}

impl Default for FileMeta {
    fn default() -> Self {
        Self {
            kind: "gradio.FileData".to_string(),
        }
    }
}

/// A file living on the remote service, as passed to or returned from a predict call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRef {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orig_name: Option<String>,
    #[serde(default)]
    pub meta: FileMeta,
}

impl FileRef {
    pub fn uploaded(path: impl Into<String>, orig_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: None,
            orig_name: Some(orig_name.into()),
            meta: FileMeta::default(),
        }
    }
}

/// One block of a server-sent event stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub event: String,
    pub data: String,
}

/// Splits a `text/event-stream` body into events. Multi-line `data:` fields
/// are joined with newlines; blocks without an `event:` line are skipped.
pub fn parse_event_stream(body: &str) -> Vec<StreamEvent> {
    let mut events = Vec::new();
    let mut event: Option<String> = None;
    let mut data: Vec<&str> = Vec::new();

    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            flush_event(&mut events, &mut event, &mut data);
        } else if let Some(name) = line.strip_prefix("event:") {
            event = Some(name.trim().to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            data.push(value.strip_prefix(' ').unwrap_or(value));
        }
    }
    flush_event(&mut events, &mut event, &mut data);

    events
}

fn flush_event(events: &mut Vec<StreamEvent>, event: &mut Option<String>, data: &mut Vec<&str>) {
    if let Some(name) = event.take() {
        events.push(StreamEvent {
            event: name,
            data: data.join("\n"),
        });
    }
    data.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_complete_stream() {
        let body = "event: generating\ndata: null\n\nevent: complete\ndata: [\"ok\"]\n\n";
        let events = parse_event_stream(body);
        assert_eq!(
            events,
            vec![
                StreamEvent {
                    event: "generating".to_string(),
                    data: "null".to_string()
                },
                StreamEvent {
                    event: "complete".to_string(),
                    data: "[\"ok\"]".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_stream_without_trailing_blank_line() {
        let events = parse_event_stream("event: error\r\ndata: \"boom\"");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "error");
        assert_eq!(events[0].data, "\"boom\"");
    }

    #[test]
    fn test_parse_skips_data_without_event() {
        let events = parse_event_stream("data: orphan\n\nevent: heartbeat\ndata: null\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "heartbeat");
    }

    #[test]
    fn test_file_ref_wire_shape() {
        let file = FileRef::uploaded("/tmp/gradio/abc/upload.png", "upload.png");
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "path": "/tmp/gradio/abc/upload.png",
                "orig_name": "upload.png",
                "meta": {"_type": "gradio.FileData"}
            })
        );
    }

    #[test]
    fn test_file_ref_accepts_extra_fields() {
        let file: FileRef = serde_json::from_value(serde_json::json!({
            "path": "/tmp/out.webp",
            "url": "http://remote/gradio_api/file=/tmp/out.webp",
            "size": 1024,
            "mime_type": "image/webp",
            "is_stream": false
        }))
        .unwrap();
        assert_eq!(file.path, "/tmp/out.webp");
        assert_eq!(
            file.url.as_deref(),
            Some("http://remote/gradio_api/file=/tmp/out.webp")
        );
        assert_eq!(file.meta, FileMeta::default());
    }
}

use std::fmt::Write;

use crate::models::{AuditLog, ExportFormat};

/// Render an already-queried log set into the requested format.
pub fn render(logs: &[AuditLog], format: ExportFormat, include_metadata: bool) -> String {
    match format {
        ExportFormat::Json => render_json(logs, include_metadata),
        ExportFormat::Csv => render_csv(logs, include_metadata),
        ExportFormat::Xml => render_xml(logs, include_metadata),
        ExportFormat::Pdf => render_pdf_summary(logs),
    }
}

fn render_json(logs: &[AuditLog], include_metadata: bool) -> String {
    let records: Vec<serde_json::Value> = logs
        .iter()
        .map(|log| {
            let mut value = serde_json::to_value(log).unwrap_or_default();
            if !include_metadata {
                if let Some(obj) = value.as_object_mut() {
                    obj.remove("metadata");
                }
            }
            value
        })
        .collect();
    serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
}

/// Fixed column order, every field double-quoted. Zero logs render as the
/// empty string with no header row.
fn render_csv(logs: &[AuditLog], include_metadata: bool) -> String {
    if logs.is_empty() {
        return String::new();
    }

    let mut csv = String::new();

    let mut headers = vec![
        "id",
        "timestamp",
        "event_type",
        "user_id",
        "session_id",
        "ip_address",
        "action",
        "resource",
        "success",
        "severity",
    ];
    if include_metadata {
        headers.push("metadata");
    }
    let _ = writeln!(
        csv,
        "{}",
        headers
            .iter()
            .map(|h| quote(h))
            .collect::<Vec<_>>()
            .join(",")
    );

    for log in logs {
        let mut fields = vec![
            log.id.to_string(),
            log.timestamp.to_rfc3339(),
            log.event_type.as_str().to_string(),
            log.user_id.clone().unwrap_or_default(),
            log.session_id.clone().unwrap_or_default(),
            log.ip_address.clone(),
            log.action.clone(),
            log.resource.clone(),
            log.success.to_string(),
            log.severity.as_str().to_string(),
        ];
        if include_metadata {
            fields.push(serde_json::to_string(&log.metadata).unwrap_or_default());
        }
        let _ = writeln!(
            csv,
            "{}",
            fields
                .iter()
                .map(|f| quote(f))
                .collect::<Vec<_>>()
                .join(",")
        );
    }

    csv
}

fn render_xml(logs: &[AuditLog], include_metadata: bool) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<audit-logs>\n");

    for log in logs {
        let _ = writeln!(xml, "  <log>");
        let _ = writeln!(xml, "    <id>{}</id>", log.id);
        let _ = writeln!(
            xml,
            "    <timestamp>{}</timestamp>",
            log.timestamp.to_rfc3339()
        );
        let _ = writeln!(
            xml,
            "    <event-type>{}</event-type>",
            log.event_type.as_str()
        );
        let _ = writeln!(
            xml,
            "    <user-id>{}</user-id>",
            xml_escape(log.user_id.as_deref().unwrap_or(""))
        );
        let _ = writeln!(
            xml,
            "    <session-id>{}</session-id>",
            xml_escape(log.session_id.as_deref().unwrap_or(""))
        );
        let _ = writeln!(
            xml,
            "    <ip-address>{}</ip-address>",
            xml_escape(&log.ip_address)
        );
        let _ = writeln!(xml, "    <action>{}</action>", xml_escape(&log.action));
        let _ = writeln!(
            xml,
            "    <resource>{}</resource>",
            xml_escape(&log.resource)
        );
        let _ = writeln!(xml, "    <success>{}</success>", log.success);
        let _ = writeln!(
            xml,
            "    <severity>{}</severity>",
            log.severity.as_str()
        );
        if include_metadata {
            let _ = writeln!(
                xml,
                "    <metadata>{}</metadata>",
                xml_escape(&serde_json::to_string(&log.metadata).unwrap_or_default())
            );
        }
        let _ = writeln!(xml, "  </log>");
    }

    xml.push_str("</audit-logs>\n");
    xml
}

/// Textual stand-in for a PDF report. Not a document renderer; kept as a
/// placeholder so callers asking for PDF get a readable summary instead
/// of an error.
fn render_pdf_summary(logs: &[AuditLog]) -> String {
    let mut out = String::from("AUDIT LOG REPORT\n================\n\n");
    let _ = writeln!(out, "Total records: {}\n", logs.len());

    for (i, log) in logs.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {} | {} | {} | user={} | {} on {} | {}",
            i + 1,
            log.timestamp.to_rfc3339(),
            log.event_type.as_str(),
            log.severity.as_str(),
            log.user_id.as_deref().unwrap_or("-"),
            log.action,
            log.resource,
            if log.success { "ok" } else { "failed" },
        );
    }

    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

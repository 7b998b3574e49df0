//! Notification body formatting.

use crate::entities::MessageKind;

/// Longest text preview shown in a notification, in characters.
const TEXT_PREVIEW_LIMIT: usize = 100;

/// Render a message as a notification body line.
///
/// Pure and total: every kind maps to a string, unknown kinds included.
/// Group notifications pass the sender name so the body reads
/// "Name: content"; direct notifications carry the name in the title
/// instead and pass `None`.
pub fn format_content(kind: &MessageKind, content: &str, sender_name: Option<&str>) -> String {
    let prefix = match sender_name {
        Some(name) => format!("{name}: "),
        None => String::new(),
    };

    match kind {
        MessageKind::Text => format!("{prefix}{}", truncate_preview(content)),
        MessageKind::Image => format!("{prefix}📷 Foto"),
        MessageKind::Video => format!("{prefix}🎥 Video"),
        MessageKind::Audio => format!("{prefix}🎵 Audio"),
        MessageKind::Document => format!("{prefix}📄 Documento"),
        MessageKind::Emoji => format!("{prefix}{content}"),
        MessageKind::Other(_) => format!("{prefix}Nuevo mensaje"),
    }
}

fn truncate_preview(content: &str) -> String {
    if content.chars().count() <= TEXT_PREVIEW_LIMIT {
        return content.to_string();
    }
    let mut preview: String = content.chars().take(TEXT_PREVIEW_LIMIT).collect();
    preview.push_str("...");
    preview
}

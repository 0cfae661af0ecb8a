use escaper::encode_minimal;

use crate::view::{Block, GroupKind, Tone};

/// HTML fragment for the results region. All text is escaped.
pub fn to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            if level == 3 {
                out.push_str(&format!("<h3 class=\"word\">{}</h3>\n", encode_minimal(text)));
            } else {
                out.push_str(&format!("<h{level}>{}</h{level}>\n", encode_minimal(text)));
            }
        }
        Block::Text { tone, text } => {
            if text.is_empty() {
                return;
            }
            let text = encode_minimal(text);
            match tone_class(*tone) {
                Some(class) => out.push_str(&format!("<p class=\"{class}\">{text}</p>\n")),
                None => out.push_str(&format!("<p>{text}</p>\n")),
            }
        }
        Block::List(items) => {
            out.push_str("<ol class=\"definitions\">");
            for item in items {
                out.push_str(&format!("<li>{}</li>", encode_minimal(item)));
            }
            out.push_str("</ol>\n");
        }
        Block::Group { kind, children } => {
            out.push_str(&format!("<div class=\"{}\">\n", group_class(*kind)));
            for child in children {
                write_block(out, child);
            }
            out.push_str("</div>\n");
        }
    }
}

fn tone_class(tone: Tone) -> Option<&'static str> {
    match tone {
        Tone::Plain => None,
        Tone::Label => Some("part-of-speech"),
        Tone::Notice => Some("no-results"),
        Tone::Error => Some("error"),
    }
}

fn group_class(kind: GroupKind) -> &'static str {
    match kind {
        GroupKind::WordList => "word-list",
        GroupKind::Word => "word-item",
        GroupKind::Meaning => "meaning",
    }
}

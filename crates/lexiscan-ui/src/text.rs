use colored::Colorize;

use crate::view::{Block, GroupKind, Tone};

/// Plain-text layout for terminals. `styled` adds colours.
pub fn to_text(blocks: &[Block], styled: bool) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block, 0, styled);
    }
    out
}

fn write_block(out: &mut String, block: &Block, indent: usize, styled: bool) {
    match block {
        Block::Heading { level, text } => {
            line(out, indent, &heading(*level, text, styled));
            if *level <= 2 {
                out.push('\n');
            }
        }
        Block::Text { tone, text } => {
            if !text.is_empty() {
                line(out, indent, &toned(*tone, text, styled));
            }
        }
        Block::List(items) => {
            for (i, item) in items.iter().enumerate() {
                line(out, indent, &format!("{}. {}", i + 1, item));
            }
        }
        Block::Group { kind, children } => match kind {
            GroupKind::WordList => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    write_block(out, child, indent, styled);
                }
            }
            // Heading or label first, details nested under it
            GroupKind::Word | GroupKind::Meaning => {
                for (i, child) in children.iter().enumerate() {
                    let depth = if i == 0 { indent } else { indent + 2 };
                    write_block(out, child, depth, styled);
                }
            }
        },
    }
}

fn line(out: &mut String, indent: usize, content: &str) {
    out.push_str(&" ".repeat(indent));
    out.push_str(content);
    out.push('\n');
}

fn heading(level: u8, text: &str, styled: bool) -> String {
    if !styled {
        return text.to_string();
    }
    match level {
        0..=2 => text.bold().to_string(),
        _ => text.cyan().bold().to_string(),
    }
}

fn toned(tone: Tone, text: &str, styled: bool) -> String {
    if !styled {
        return text.to_string();
    }
    match tone {
        Tone::Plain => text.to_string(),
        Tone::Label => text.italic().to_string(),
        Tone::Notice => text.yellow().to_string(),
        Tone::Error => text.red().to_string(),
    }
}

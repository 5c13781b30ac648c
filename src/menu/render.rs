//! Menu screen rendering.

use super::{MenuAction, MenuItem};
use crate::config::ShellConfig;
use crate::io::CharIo;
use crate::tree::CommandTree;

/// Clear the screen and home the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Line under the header and around the footer.
pub const SEPARATOR: &str = "----------------------------------------------";

/// Navigation key legend.
pub const LEGEND: &str = "[Up/Down] Select  [Enter/Right] Execute  [q/Left] Back";

const TITLE_PREFIX: &str = "=== ";
const TITLE_SUFFIX: &str = " ===";
const SELECTOR: &str = ">";
const SUBMENU_MARK: &str = "...";
const ADMIN_MARK: &str = "*";

/// ANSI sequences applied to each part of the screen.
#[derive(Debug)]
struct Theme {
    title: &'static str,
    header: &'static str,
    selected: &'static str,
    normal: &'static str,
    submenu: &'static str,
    admin: &'static str,
    footer: &'static str,
    prompt: &'static str,
    reset: &'static str,
}

const PLAIN: Theme = Theme {
    title: "",
    header: "",
    selected: "",
    normal: "",
    submenu: "",
    admin: "",
    footer: "",
    prompt: "",
    reset: "",
};

const ANSI: Theme = Theme {
    title: "\x1b[1;36m",
    header: "\x1b[33m",
    selected: "\x1b[1;7m",
    normal: "\x1b[0m",
    submenu: "\x1b[32m",
    admin: "\x1b[31m",
    footer: "\x1b[2m",
    prompt: "\x1b[1m",
    reset: "\x1b[0m",
};

fn theme<C: ShellConfig>() -> &'static Theme {
    if C::MENU_COLORS { &ANSI } else { &PLAIN }
}

/// Draw a full menu screen.
///
/// Shows the items `scroll..scroll + MENU_DISPLAY_ITEMS`; the selected one carries
/// the selector, the others their index.
pub fn menu<IO: CharIo, C: ShellConfig>(
    io: &mut IO,
    tree: &CommandTree<'_>,
    title: &str,
    items: &[MenuItem<'_>],
    selected: usize,
    scroll: usize,
) -> Result<(), IO::Error> {
    let theme = theme::<C>();
    let visible = C::MENU_DISPLAY_ITEMS.max(1);

    io.write_str(CLEAR_SCREEN)?;
    header(io, theme, title)?;
    for (index, item) in items.iter().enumerate().skip(scroll).take(visible) {
        item_line(io, theme, tree, index, item, index == selected)?;
    }
    footer(io, theme, scroll, visible, items.len())
}

fn header<IO: CharIo>(io: &mut IO, theme: &Theme, title: &str) -> Result<(), IO::Error> {
    let width = SEPARATOR.len();
    let title_len = TITLE_PREFIX.len() + title.chars().count() + TITLE_SUFFIX.len();

    io.write_str("\r\n")?;
    pad(io, width.saturating_sub(title_len) / 2)?;
    write!(io, "{}{}{}{}{}\r\n", theme.title, TITLE_PREFIX, title, TITLE_SUFFIX, theme.reset)?;
    pad(io, width.saturating_sub(LEGEND.len()) / 2)?;
    write!(io, "{}{}{}\r\n{}\r\n", theme.header, LEGEND, theme.reset, SEPARATOR)
}

fn item_line<IO: CharIo>(
    io: &mut IO,
    theme: &Theme,
    tree: &CommandTree<'_>,
    index: usize,
    item: &MenuItem<'_>,
    selected: bool,
) -> Result<(), IO::Error> {
    let style = if selected { theme.selected } else { theme.normal };

    io.write_str(style)?;
    if selected {
        write!(io, "{} ", SELECTOR)?;
    } else {
        write!(io, "{} ", index)?;
    }

    if opens_submenu(tree, item) {
        write!(io, "{}{}{}{}{} ", theme.reset, theme.submenu, SUBMENU_MARK, theme.reset, style)?;
    } else {
        io.write_str("    ")?;
    }

    if item.requires_admin(tree) {
        write!(io, "{}{}{}{} ", theme.reset, theme.admin, ADMIN_MARK, theme.reset)?;
        io.write_str(style)?;
    } else {
        io.write_str("  ")?;
    }

    write!(io, "{}{}\r\n", item.title, theme.reset)
}

fn footer<IO: CharIo>(
    io: &mut IO,
    theme: &Theme,
    scroll: usize,
    visible: usize,
    count: usize,
) -> Result<(), IO::Error> {
    write!(io, "{}\r\n", SEPARATOR)?;
    if count > visible {
        write!(
            io,
            "{}Showing items {}-{} of {}{}\r\n{}\r\n",
            theme.footer,
            scroll + 1,
            (scroll + visible).min(count),
            count,
            theme.reset,
            SEPARATOR
        )?;
    }
    Ok(())
}

/// Draw the argument collection screen.
pub fn argument_prompt<IO: CharIo, C: ShellConfig>(io: &mut IO, title: &str, params: &str) -> Result<(), IO::Error> {
    let theme = theme::<C>();

    io.write_str(CLEAR_SCREEN)?;
    write!(io, "{}Function: {}{}\r\n\n", theme.title, title, theme.reset)?;
    if !params.is_empty() {
        write!(io, "{}Parameters: {}{}\r\n\n", theme.header, params, theme.reset)?;
    }
    write!(io, "{}Enter arguments: {}", theme.prompt, theme.reset)
}

/// Print a one-line notice and ask for a key press.
pub fn notice<IO: CharIo>(io: &mut IO, message: &str) -> Result<(), IO::Error> {
    write!(io, "\r\n{}\r\nPress any key to continue...", message)
}

fn pad<IO: CharIo>(io: &mut IO, width: usize) -> Result<(), IO::Error> {
    write!(io, "{:width$}", "", width = width)
}

/// Check whether executing `item` navigates into another menu.
fn opens_submenu(tree: &CommandTree<'_>, item: &MenuItem<'_>) -> bool {
    match item.action {
        MenuAction::Submenu(_) | MenuAction::Commands => true,
        MenuAction::Command(command) => tree.find(command).is_some_and(|id| tree.has_children(id)),
        _ => false,
    }
}

//! Built-in commands registered by the shell itself.
//!
//! `help` and `quit` are always present. `auth` is added when a secret verifier is
//! attached and `menu` when a root menu is attached.

use super::Invocation;
use crate::error::CliError;
use crate::response::Response;
use crate::tree::{Command, NO_ARGS};

/// Key legend printed by `help`.
const KEY_LEGEND: &str = "\
<TAB> !      auto-completion\r\n\
<cr>         execute\r\n\
CTRL-P       previous input line\r\n\
CTRL-N       next input line\r\n\
CTRL-D       quit shell\r\n\
/            return to top level\r\n\
ESC ESC      clear input line\r\n\
?            help on current line";

/// `help`: print the key legend.
pub static HELP: Command = Command::new("help")
    .help("display help")
    .usage(NO_ARGS)
    .handler(help);

/// `quit`: stop the shell and drop privileges.
pub static QUIT: Command = Command::new("quit")
    .help("exit shell")
    .usage(NO_ARGS)
    .handler(quit);

/// `auth <password>`: raise privileges to admin.
pub static AUTH: Command = Command::new("auth")
    .help("authenticate for admin privileges")
    .usage("password")
    .handler(auth);

/// `menu`: switch to menu navigation.
pub static MENU: Command = Command::new("menu")
    .help("enter menu mode")
    .usage(NO_ARGS)
    .handler(menu);

fn help(_inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    Ok(Response::success(KEY_LEGEND))
}

fn quit(inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    inv.quit();
    Ok(Response::success("Exiting shell..."))
}

fn auth(inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    let Some(secret) = inv.get(1).filter(|_| inv.argc() == 2) else {
        return Ok(Response::success("Usage: auth <password>").without_history());
    };

    let message = if inv.elevate(secret) {
        "Authentication successful. Admin privileges granted."
    } else {
        "Authentication failed. Incorrect password."
    };
    Ok(Response::success(message).without_history())
}

fn menu(inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    inv.request_menu();
    Ok(Response::empty())
}

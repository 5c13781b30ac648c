//! Fixed pool of menus synthesized from the command tree.
//!
//! Each source gets one slot for the lifetime of the navigator: activating the same
//! command again regenerates its slot in place instead of taking a new one.

use super::{MenuAction, MenuItem};
use crate::config::{MAX_SYNTH_MENUS, MENU_MAX_ITEMS};
use crate::shell::builtins;
use crate::tree::{Command, CommandId, CommandTree};
use crate::util::push_bounded;

/// Capacity of a synthesized menu title.
pub const SYNTH_TITLE_LEN: usize = 48;

/// Title of the menu listing every top-level command.
pub const COMMANDS_TITLE: &str = "Shell Commands";

/// Menu generated from a command's children (or from the root chain).
#[derive(Debug, Clone)]
pub struct SynthMenu<'a> {
    /// Command whose children are listed, `None` for the top-level listing
    source: Option<&'a Command>,

    /// Display title
    pub title: heapless::String<SYNTH_TITLE_LEN>,

    /// Generated items, ending with a back item
    pub items: heapless::Vec<MenuItem<'a>, MENU_MAX_ITEMS>,
}

/// Slot storage for synthesized menus.
#[derive(Debug, Default)]
pub struct SubmenuPool<'a> {
    menus: heapless::Vec<SynthMenu<'a>, MAX_SYNTH_MENUS>,
}

impl<'a> SubmenuPool<'a> {
    /// Create an empty pool.
    pub const fn new() -> Self {
        Self {
            menus: heapless::Vec::new(),
        }
    }

    /// Menu stored in `slot`.
    pub fn get(&self, slot: usize) -> Option<&SynthMenu<'a>> {
        self.menus.get(slot)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// Check whether no menu has been synthesized yet.
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Build the `<name> Commands` menu for the children of `id`.
    ///
    /// Returns `None` when every slot is taken by other sources.
    pub fn children_of(&mut self, tree: &CommandTree<'a>, id: CommandId) -> Option<usize> {
        let command = tree.command(id);
        let slot = self.slot_for(Some(command))?;
        let menu = &mut self.menus[slot];

        menu.title.clear();
        push_bounded(&mut menu.title, command.name);
        push_bounded(&mut menu.title, " Commands");
        fill(menu, tree, tree.first_child(id), "Back");

        log::debug!("synthesized menu for '{}' in slot {}", command.name, slot);
        Some(slot)
    }

    /// Build the menu listing all top-level commands except `menu` and `quit`.
    pub fn commands(&mut self, tree: &CommandTree<'a>) -> Option<usize> {
        let slot = self.slot_for(None)?;
        let menu = &mut self.menus[slot];

        menu.title.clear();
        push_bounded(&mut menu.title, COMMANDS_TITLE);
        fill(menu, tree, tree.root(), "Back to Main Menu");
        Some(slot)
    }

    /// Existing slot of `source`, or a fresh one.
    fn slot_for(&mut self, source: Option<&'a Command>) -> Option<usize> {
        let same = |menu: &SynthMenu<'a>| match (menu.source, source) {
            (Some(a), Some(b)) => core::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if let Some(slot) = self.menus.iter().position(same) {
            return Some(slot);
        }

        let menu = SynthMenu {
            source,
            title: heapless::String::new(),
            items: heapless::Vec::new(),
        };
        match self.menus.push(menu) {
            Ok(()) => Some(self.menus.len() - 1),
            Err(_) => {
                log::warn!("synthesized menu pool full ({} slots)", MAX_SYNTH_MENUS);
                None
            }
        }
    }
}

/// Fill `menu` with one item per command of the chain at `first`, then `back`.
fn fill<'a>(menu: &mut SynthMenu<'a>, tree: &CommandTree<'a>, first: Option<CommandId>, back: &'static str) {
    menu.items.clear();
    for id in tree.siblings(first) {
        let command = tree.command(id);
        if is_hidden(command) {
            continue;
        }
        if menu.items.len() + 1 >= MENU_MAX_ITEMS {
            log::warn!("menu '{}' truncated to {} items", menu.title, MENU_MAX_ITEMS);
            break;
        }
        let _ = menu.items.push(MenuItem {
            title: command.name,
            action: MenuAction::Command(command),
            admin: tree.is_admin(id),
        });
    }
    let _ = menu.items.push(MenuItem::back(back));
}

/// Built-ins that make no sense inside a menu.
fn is_hidden(command: &Command) -> bool {
    core::ptr::eq(command, &builtins::MENU) || core::ptr::eq(command, &builtins::QUIT)
}

//! Renders the binding table as Hyprland `bind` lines.
//!
//! Hyprland owns the keyboard, so each chord is bound there and forwarded
//! to the daemon socket as `{"Key":"<chord>"}`.  Paste the output of
//! `grprouter --print-bindings` into `hyprland.conf`.

use crate::bindings::{BindingTable, Modifier};

fn modifier_name(m: Modifier) -> &'static str {
    match m {
        Modifier::Super => "SUPER",
        Modifier::Ctrl => "CTRL",
        Modifier::Alt => "ALT",
        Modifier::Shift => "SHIFT",
    }
}

/// One `bind = …` line per chord, each preceded by a comment naming the
/// action.
pub fn bind_lines(table: &BindingTable, socket: &str) -> String {
    let mut out = String::new();
    for (chord, action) in table.iter() {
        let mods: Vec<&str> = chord.modifiers().iter().map(|m| modifier_name(*m)).collect();
        out.push_str(&format!("# {}\n", action));
        out.push_str(&format!(
            "bind = {}, {}, exec, echo '{{\"Key\":\"{}\"}}' | socat - UNIX-CONNECT:{}\n",
            mods.join(" "),
            chord.key(),
            chord,
            socket
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_chords_per_group() {
        let table = BindingTable::build(["1"], Modifier::Alt).unwrap();
        let cfg = bind_lines(&table, "/tmp/grprouter.sock");
        let lines: Vec<&str> = cfg.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "# switch to group 1");
        assert_eq!(
            lines[1],
            "bind = ALT, 1, exec, echo '{\"Key\":\"alt+1\"}' | socat - UNIX-CONNECT:/tmp/grprouter.sock"
        );
        assert_eq!(lines[2], "# move window to group 1");
        assert!(lines[3].starts_with("bind = ALT SHIFT, 1, exec, echo '{\"Key\":\"alt+shift+1\"}'"));
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert!(bind_lines(&BindingTable::default(), "/s").is_empty());
    }
}

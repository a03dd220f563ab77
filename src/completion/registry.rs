//! Known native-utility registry
//!
//! The bridge only answers for commands known to carry bash completion
//! definitions; everything else is "not applicable" so other providers in
//! the host can take over. The set is static configuration data the engine
//! consults but does not own.

/// Fixed identifier the host uses to register the predictor
pub const PREDICTOR_ID: &str = "4d039a0a-9a43-4a7c-9b2e-21f2c1b5c7de";

/// Short predictor name shown by the host
pub const PREDICTOR_NAME: &str = "bash";

/// Predictor description shown by the host
pub const PREDICTOR_DESCRIPTION: &str =
    "Completion candidates sourced from bash's native completion scripts";

/// Native utilities with bash completion definitions, sorted bytewise so
/// membership checks can binary-search.
static NATIVE_UTIL_NAMES: &[&str] = &[
    "apt",
    "apt-cache",
    "apt-get",
    "awk",
    "basename",
    "bash",
    "brew",
    "bzip2",
    "cat",
    "chgrp",
    "chmod",
    "chown",
    "cp",
    "curl",
    "cut",
    "date",
    "dd",
    "df",
    "diff",
    "dig",
    "dnf",
    "docker",
    "du",
    "echo",
    "env",
    "find",
    "gcc",
    "git",
    "grep",
    "gunzip",
    "gzip",
    "head",
    "htop",
    "ip",
    "journalctl",
    "kill",
    "killall",
    "less",
    "ln",
    "ls",
    "lsof",
    "make",
    "man",
    "mkdir",
    "mount",
    "mv",
    "nano",
    "netstat",
    "nice",
    "nl",
    "nohup",
    "npm",
    "pacman",
    "ping",
    "pip",
    "ps",
    "rm",
    "rmdir",
    "rsync",
    "scp",
    "sed",
    "sort",
    "ssh",
    "sudo",
    "systemctl",
    "tail",
    "tar",
    "tmux",
    "top",
    "touch",
    "umount",
    "uname",
    "uniq",
    "vim",
    "wget",
    "whereis",
    "which",
    "yum",
    "zip",
];

/// Check whether a command is a known native utility
///
/// # Arguments
/// * `name` - Command name, matched case-sensitively
///
/// # Returns
/// * `bool` - True when the bridge should answer for the command
pub fn is_known_util(name: &str) -> bool {
    NATIVE_UTIL_NAMES.binary_search(&name).is_ok()
}

/// All known native utility names, sorted
pub fn known_utils() -> &'static [&'static str] {
    NATIVE_UTIL_NAMES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sorted_for_binary_search() {
        let mut sorted = NATIVE_UTIL_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, NATIVE_UTIL_NAMES);
    }

    #[test]
    fn test_common_utilities_are_known() {
        assert!(is_known_util("git"));
        assert!(is_known_util("ls"));
        assert!(is_known_util("ssh"));
        assert!(is_known_util("apt-get"));
    }

    #[test]
    fn test_unknown_commands_are_rejected() {
        assert!(!is_known_util("frobnicate"));
        assert!(!is_known_util("definitely-not-a-util"));
        assert!(!is_known_util(""));
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        assert!(!is_known_util("Git"));
        assert!(!is_known_util("LS"));
    }

    #[test]
    fn test_predictor_identity() {
        assert!(!PREDICTOR_ID.is_empty());
        assert_eq!(PREDICTOR_NAME, "bash");
        assert!(!PREDICTOR_DESCRIPTION.is_empty());
    }
}

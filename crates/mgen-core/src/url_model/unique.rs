//! Free-name selection when the target filename is taken.

use std::collections::HashSet;

/// Returns `candidate` if it is not in `existing`, otherwise the first free
/// `stem (N).ext` for N = 1, 2, ...
pub fn unique_filename_among(candidate: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(candidate) {
        return candidate.to_string();
    }
    let (stem, ext) = match candidate.rfind('.') {
        Some(i) if i > 0 => (&candidate[..i], &candidate[i..]),
        _ => (candidate, ""),
    };
    let mut n = 1u32;
    loop {
        let name = format!("{} ({}){}", stem, n, ext);
        if !existing.contains(&name) {
            return name;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn free_name_is_kept() {
        assert_eq!(unique_filename_among("meme.png", &set(&[])), "meme.png");
        assert_eq!(unique_filename_among("meme.png", &set(&["other.png"])), "meme.png");
    }

    #[test]
    fn taken_name_gets_counter() {
        assert_eq!(
            unique_filename_among("meme.png", &set(&["meme.png"])),
            "meme (1).png"
        );
        assert_eq!(
            unique_filename_among("meme.png", &set(&["meme.png", "meme (1).png"])),
            "meme (2).png"
        );
    }

    #[test]
    fn no_extension_and_dotfile() {
        assert_eq!(unique_filename_among("meme", &set(&["meme"])), "meme (1)");
        assert_eq!(unique_filename_among(".meme", &set(&[".meme"])), ".meme (1)");
    }
}

use std::borrow::Cow;

pub const TITLE_MAX_CHARS: usize = 35;
pub const ELLIPSIS: &str = "...";

/// Cuts `title` to [`TITLE_MAX_CHARS`] characters and appends [`ELLIPSIS`]
/// when it is longer. Counts characters, not bytes.
pub fn truncate_title(title: &str) -> Cow<'_, str> {
    match title.char_indices().nth(TITLE_MAX_CHARS) {
        None => Cow::Borrowed(title),
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &title[..cut])),
    }
}

#[cfg(test)]
mod tests {
    use super::{ELLIPSIS, TITLE_MAX_CHARS, truncate_title};
    use proptest::prelude::*;

    #[test]
    fn short_titles_are_untouched() {
        let t = "a".repeat(TITLE_MAX_CHARS);
        assert_eq!(truncate_title(&t), t.as_str());
    }

    #[test]
    fn long_titles_get_ellipsis() {
        let t = "b".repeat(TITLE_MAX_CHARS + 1);
        let out = truncate_title(&t);
        assert_eq!(out, format!("{}...", "b".repeat(TITLE_MAX_CHARS)));
    }

    #[test]
    fn cuts_on_char_boundaries() {
        let t = "关于进一步完善新能源汽车推广应用财政补贴政策的通知关于进一步完善新能源汽车推广应用";
        let out = truncate_title(t);
        assert_eq!(out.chars().count(), TITLE_MAX_CHARS + ELLIPSIS.len());
        assert!(out.starts_with("关于进一步完善"));
    }

    proptest! {
        #[test]
        fn prop_truncation_bounds(title in "\\PC{0,80}") {
            let out = truncate_title(&title);
            let n = title.chars().count();
            if n > TITLE_MAX_CHARS {
                prop_assert!(out.ends_with(ELLIPSIS));
                prop_assert_eq!(out.chars().count(), TITLE_MAX_CHARS + 3);
            } else {
                prop_assert_eq!(out.as_ref(), title.as_str());
            }
            prop_assert!(out.chars().count() <= 38);
        }
    }
}

//! HTML rendering for the guest book.

use mini_http::protocol::Method;

const SIGN_FORM: &str = "<form action=add method=post><p><input name=guest></p><p><button>Sign the book!</button></p></form>";

/// Renders every entry as a paragraph, followed by the form to sign the book.
///
/// Entries are written as they were submitted.
pub fn guest_book(entries: &[String]) -> String {
    let capacity = entries.iter().map(|entry| entry.len() + 7).sum::<usize>() + SIGN_FORM.len() + 15;
    let mut out = String::with_capacity(capacity);

    out.push_str("<!doctype html>");
    for entry in entries {
        out.push_str("<p>");
        out.push_str(entry);
        out.push_str("</p>");
    }
    out.push_str(SIGN_FORM);
    out
}

pub fn not_found(method: Method, target: &str) -> String {
    format!("<!doctype html><h1>{method} {target} not found!</h1>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_guest_book() {
        assert_eq!(
            guest_book(&[]),
            "<!doctype html><form action=add method=post><p><input name=guest></p><p><button>Sign the book!</button></p></form>"
        );
    }

    #[test]
    fn entries_before_form() {
        let page = guest_book(&["a".to_owned(), "b".to_owned()]);

        assert!(page.starts_with("<!doctype html><p>a</p><p>b</p><form action=add method=post>"));
        assert!(page.ends_with(SIGN_FORM));
    }

    #[test]
    fn not_found_names_request() {
        assert_eq!(not_found(Method::Post, "/missing"), "<!doctype html><h1>POST /missing not found!</h1>");
    }
}

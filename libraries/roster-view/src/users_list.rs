//! User list component and the page that hosts it.

use crate::element::Element;
use roster_core::User;

/// Class applied to every user heading.
pub const USER_CARD_CLASS: &str = "card card-body bg-light";

/// One `h4` per user inside a `div`, labelled with the username.
///
/// Order follows `users`; inactive users are rendered like any other.
pub fn users_list(users: &[User]) -> Element {
    Element::new("div").with_children(users.iter().map(|user| {
        Element::new("h4")
            .with_prop("class", USER_CARD_CLASS)
            .with_text(user.username.as_str())
    }))
}

/// Full document wrapping [`users_list`].
pub fn users_page(users: &[User]) -> Element {
    let head = Element::new("head")
        .with_child(Element::new("meta").with_prop("charset", "utf-8"))
        .with_child(Element::new("title").with_text("Users"));

    let container = Element::new("div")
        .with_prop("class", "container")
        .with_child(
            Element::new("h1")
                .with_prop("class", "title is-1")
                .with_text("All Users"),
        )
        .with_child(Element::new("hr"))
        .with_child(Element::new("br"))
        .with_child(users_list(users));

    Element::new("html")
        .with_prop("lang", "en")
        .with_child(head)
        .with_child(
            Element::new("body")
                .with_child(Element::new("section").with_prop("class", "section").with_child(container)),
        )
}

/// HTML document for the users page, doctype included.
pub fn render_page(users: &[User]) -> String {
    format!("<!DOCTYPE html>\n{}", users_page(users).to_html())
}

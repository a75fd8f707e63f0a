// FILE: crates/server/src/render.rs
//! HTML for the board page
//!
//! Every stored value was escaped on the way in, so names, titles and
//! links are written out as-is.

use bookboard_core::escape_html;
use bookboard_library::{CategoryGroup, GroupedListing};
use std::fmt;

pub const SITE_NAME: &str = "LinkedIn Coin";
pub const TAGLINE: &str = "A tagline or symbol here";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Book Sharing Platform</title>
    <link href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css" rel="stylesheet">
</head>
<body class="bg-gray-100 text-gray-800">
"#;

const PAGE_FOOT: &str = "</body>\n</html>\n";

const INPUT_CLASS: &str = "w-full p-2 mb-4 rounded bg-gray-200 border border-gray-300";
const BUTTON_CLASS: &str = "w-full p-2 bg-blue-500 hover:bg-blue-400 rounded text-white";

/// The full board: category grid plus both forms
pub struct BoardPage<'a> {
    listing: &'a GroupedListing,
}

impl<'a> BoardPage<'a> {
    pub fn new(listing: &'a GroupedListing) -> Self {
        Self { listing }
    }

    fn header(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<header class="bg-white shadow p-5 flex justify-between items-center">"#
        )?;
        writeln!(
            f,
            r#"    <div class="flex items-center"><span class="text-2xl font-bold">{}</span></div>"#,
            SITE_NAME
        )?;
        writeln!(f, r#"    <div><span class="text-sm">"{}"</span></div>"#, TAGLINE)?;
        writeln!(f, "</header>")
    }

    fn group(f: &mut fmt::Formatter<'_>, group: &CategoryGroup<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"        <div class="bg-white p-4 shadow rounded hover:bg-gray-50">"#
        )?;
        writeln!(
            f,
            r#"            <h3 class="font-bold">{}</h3>"#,
            group.category
        )?;

        if group.is_empty() {
            writeln!(
                f,
                r#"            <p class="text-gray-500">No books available.</p>"#
            )?;
        } else {
            writeln!(f, r#"            <ul class="mt-2">"#)?;
            for book in group.books {
                writeln!(
                    f,
                    r#"                <li><a href="{}" class="text-blue-500 hover:underline">{}</a></li>"#,
                    book.link, book.title
                )?;
            }
            writeln!(f, "            </ul>")?;
        }

        writeln!(f, "        </div>")
    }

    fn category_form(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"    <section class="mb-8">"#)?;
        writeln!(
            f,
            r#"        <h2 class="text-xl font-semibold mb-4">Add a New Category</h2>"#
        )?;
        writeln!(f, r#"        <form method="POST" action="/">"#)?;
        writeln!(
            f,
            r#"            <input type="text" name="categoryName" placeholder="Enter category name" required class="{}">"#,
            INPUT_CLASS
        )?;
        writeln!(
            f,
            r#"            <button type="submit" class="{}">Add Category</button>"#,
            BUTTON_CLASS
        )?;
        writeln!(f, "        </form>")?;
        writeln!(f, "    </section>")
    }

    fn book_form(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"    <section class="mb-8">"#)?;
        writeln!(
            f,
            r#"        <h2 class="text-xl font-semibold mb-4">Add a New Book</h2>"#
        )?;
        writeln!(f, r#"        <form method="POST" action="/">"#)?;
        writeln!(
            f,
            r#"            <input type="text" name="bookTitle" placeholder="Enter book title" required class="{}">"#,
            INPUT_CLASS
        )?;
        writeln!(
            f,
            r#"            <input type="url" name="bookLink" placeholder="Enter PDF link" required class="{}">"#,
            INPUT_CLASS
        )?;
        writeln!(
            f,
            r#"            <select name="bookCategory" class="{}" required>"#,
            INPUT_CLASS
        )?;
        writeln!(f, r#"                <option value="">Select Category</option>"#)?;
        for category in self.listing.categories() {
            writeln!(
                f,
                r#"                <option value="{0}">{0}</option>"#,
                category
            )?;
        }
        writeln!(f, "            </select>")?;
        writeln!(
            f,
            r#"            <button type="submit" class="{}">Add Book</button>"#,
            BUTTON_CLASS
        )?;
        writeln!(f, "        </form>")?;
        writeln!(f, "    </section>")
    }
}

impl fmt::Display for BoardPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PAGE_HEAD)?;
        Self::header(f)?;

        writeln!(f, r#"<main class="container mx-auto p-5">"#)?;
        writeln!(f, r#"    <section class="mb-8">"#)?;
        writeln!(
            f,
            r#"        <h2 class="text-xl font-semibold mb-4">Boards List</h2>"#
        )?;
        writeln!(f, r#"        <div class="grid grid-cols-3 gap-4">"#)?;
        for group in self.listing.groups() {
            Self::group(f, &group)?;
        }
        writeln!(f, "        </div>")?;
        writeln!(f, "    </section>")?;

        Self::category_form(f)?;
        self.book_form(f)?;

        writeln!(f, "</main>")?;
        f.write_str(PAGE_FOOT)
    }
}

/// Renders the board for `listing`
pub fn board_page(listing: &GroupedListing) -> String {
    BoardPage::new(listing).to_string()
}

/// Renders the page shown when a request cannot be served
pub fn error_page(message: &str) -> String {
    format!(
        concat!(
            "{head}<main class=\"container mx-auto p-5\">\n",
            "    <h2 class=\"text-xl font-semibold mb-4\">Something went wrong</h2>\n",
            "    <p>{message}</p>\n",
            "    <p><a href=\"/\" class=\"text-blue-500 hover:underline\">",
            "Back to the board</a></p>\n",
            "</main>\n{foot}",
        ),
        head = PAGE_HEAD,
        message = escape_html(message),
        foot = PAGE_FOOT,
    )
}

//! Server-side page rendering.
//!
//! [`render`] is a pure function from a [`Template`] and a [`PageContext`] to
//! an HTML document. Every piece of user-controlled text goes through
//! `html_escape` before it reaches the markup.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::db::{Movie, User};

/// Values injected into every page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// The sole configured administrator, shown in the page header whether or
    /// not anyone is logged in.
    pub admin: Option<User>,

    /// Whether the current viewer holds an authenticated session.
    pub authenticated: bool,

    /// One-shot messages queued by earlier requests.
    pub flashes: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum Template<'a> {
    Index { movies: &'a [Movie] },
    Edit { movie: &'a Movie },
    Login,
    Settings { name: &'a str },
    NotFound,
    LoginRequired,
    ServerError,
}

impl Template<'_> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Index { .. } => "index.html",
            Self::Edit { .. } => "edit.html",
            Self::Login => "login.html",
            Self::Settings { .. } => "settings.html",
            Self::NotFound => "404.html",
            Self::LoginRequired => "401.html",
            Self::ServerError => "500.html",
        }
    }
}

#[must_use]
pub fn render(template: Template<'_>, ctx: &PageContext) -> String {
    let content = match template {
        Template::Index { movies } => index(movies, ctx.authenticated),
        Template::Edit { movie } => edit(movie),
        Template::Login => login(),
        Template::Settings { name } => settings(name),
        Template::NotFound => error_page(
            "Page Not Found - 404",
            "The page you are looking for does not exist.",
        ),
        Template::LoginRequired => error_page(
            "Login Required - 401",
            "Please <a href=\"/login\">log in</a> to access this page.",
        ),
        Template::ServerError => error_page(
            "Internal Server Error - 500",
            "Something went wrong. Please try again later.",
        ),
    };

    layout(ctx, &content)
}

fn layout(ctx: &PageContext, content: &str) -> String {
    let heading = ctx.admin.as_ref().map_or_else(
        || "Watchlist".to_string(),
        |admin| format!("{}'s Watchlist", encode_text(&admin.name)),
    );

    let mut flashes = String::new();
    for message in &ctx.flashes {
        let _ = writeln!(flashes, "<div class=\"alert\">{}</div>", encode_text(message));
    }

    let account_links = if ctx.authenticated {
        "<li><a href=\"/settings\">Settings</a></li>\n<li><a href=\"/logout\">Logout</a></li>"
    } else {
        "<li><a href=\"/login\">Login</a></li>"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{heading}</title>
<link rel="stylesheet" href="/static/style.css" type="text/css">
</head>
<body>
{flashes}<h2>{heading}</h2>
<nav>
<ul>
<li><a href="/">Home</a></li>
{account_links}
</ul>
</nav>
{content}
<footer>
<small>&copy; Watchlist</small>
</footer>
</body>
</html>
"#
    )
}

fn movie_form(title: &str, year: &str, submit: &str) -> String {
    format!(
        r#"<form method="post">
Name <input type="text" name="title" autocomplete="off" required value="{title}">
Year <input type="text" name="year" autocomplete="off" required value="{year}">
<input class="btn" type="submit" name="submit" value="{submit}">
</form>"#,
        title = encode_double_quoted_attribute(title),
        year = encode_double_quoted_attribute(year),
    )
}

fn index(movies: &[Movie], authenticated: bool) -> String {
    let mut out = format!("<p>{} Titles</p>\n", movies.len());

    if authenticated {
        out.push_str(&movie_form("", "", "Add"));
        out.push('\n');
    }

    out.push_str("<ul class=\"movie-list\">\n");
    for movie in movies {
        let _ = write!(
            out,
            "<li>{} - {}\n<span class=\"float-right\">\n",
            encode_text(&movie.title),
            encode_text(&movie.year)
        );

        if authenticated {
            let _ = write!(
                out,
                r#"<a class="btn" href="/movie/edit/{id}">Edit</a>
<form class="inline-form" method="post" action="/movie/delete/{id}">
<input class="btn" type="submit" name="delete" value="Delete" onclick="return confirm('Are you sure?')">
</form>
"#,
                id = movie.id
            );
        }

        let _ = write!(
            out,
            "<a class=\"imdb\" href=\"https://www.imdb.com/find?q={}\" target=\"_blank\" title=\"Find this movie on IMDb\">IMDb</a>\n</span>\n</li>\n",
            urlencoding::encode(&movie.title)
        );
    }
    out.push_str("</ul>");

    out
}

fn edit(movie: &Movie) -> String {
    format!(
        "<h3>Edit item</h3>\n{}",
        movie_form(&movie.title, &movie.year, "Update")
    )
}

fn login() -> String {
    r#"<h3>Login</h3>
<form method="post">
Username<br>
<input type="text" name="username" required><br><br>
Password<br>
<input type="password" name="password" required><br><br>
<input class="btn" type="submit" name="submit" value="Submit">
</form>"#
        .to_string()
}

fn settings(name: &str) -> String {
    format!(
        r#"<h3>Settings</h3>
<form method="post">
Your Name <input type="text" name="name" autocomplete="off" required value="{}">
<input class="btn" type="submit" name="submit" value="Save">
</form>"#,
        encode_double_quoted_attribute(name)
    )
}

fn error_page(title: &str, body: &str) -> String {
    format!(
        "<ul class=\"movie-list\">\n<li>\n{title}\n<span class=\"float-right\">\n<a href=\"/\">Go Back</a>\n</span>\n</li>\n</ul>\n<p>{body}</p>"
    )
}

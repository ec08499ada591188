//! Plain-text rendering of users, facets and notices

use chrono::NaiveDate;
use userdir_core::{Facets, User};

fn age_label(user: &User, today: NaiveDate) -> String {
    match user.age_on(today) {
        Some(age) => format!("{age}y"),
        None => "?".to_string(),
    }
}

fn id_label(user: &User) -> String {
    user.id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// One-line summary used by `list`
pub fn user_line(user: &User, today: NaiveDate) -> String {
    format!(
        "{:>5}  {} ({})  {}  {} / {} / {}  {}",
        id_label(user),
        user.name,
        user.nickname,
        age_label(user, today),
        user.country,
        user.province,
        user.neighborhood,
        user.email,
    )
}

/// Detailed view. `photo_url` is the already-resolved absolute URL.
pub fn user_card(user: &User, today: NaiveDate, photo_url: Option<&str>) -> String {
    let birth = match user.age_on(today) {
        Some(age) => format!("{} ({} years)", user.birth_date, age),
        None => user.birth_date.clone(),
    };

    let mut lines = vec![
        format!("User #{}", id_label(user)),
        format!("  Name:        {}", user.name),
        format!("  Nickname:    {}", user.nickname),
        format!("  Birth date:  {birth}"),
        format!(
            "  Location:    {}, {}, {}",
            user.neighborhood, user.province, user.country
        ),
        format!("  Email:       {}", user.email),
    ];
    if let Some(url) = photo_url {
        lines.push(format!("  Photo:       {url}"));
    }
    lines.join("\n")
}

pub fn facets(facets: &Facets) -> String {
    format!(
        "Countries: {}\nProvinces: {}",
        join_or_none(&facets.countries),
        join_or_none(&facets.provinces)
    )
}

pub fn summary(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{total} user(s)")
    } else {
        format!("Showing {shown} of {total} user(s)")
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

//! HTML email body renderer
//!
//! Drafts the weekly announcement as a self-contained HTML page the house
//! manager can paste into any mail client.

use std::fmt::Write as FmtWrite;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::engine::run::WeekPlan;
use crate::roster::Roster;

/// The Friday of the week containing `today` (or `today` itself on a Friday,
/// wrapping forward over the weekend).
#[must_use]
pub fn upcoming_friday(today: NaiveDate) -> NaiveDate {
    let days_ahead =
        (7 + Weekday::Fri.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .unwrap_or(today)
}

/// Render the email body for a finished week
#[must_use]
pub fn render_email(plan: &WeekPlan, roster: &Roster, friday: NaiveDate) -> String {
    let date = friday.format("%m/%d");
    let week = plan.state.week.index();

    let mut html = String::new();
    let _ = write!(
        html,
        "<html><head><title>Chores {date}</title></head>\
         <h1>Chore Assignments {date}</h1>"
    );
    html.push_str("Hi Housemates,<br/><br/>");
    html.push_str("Below are this weekend's chore assignments!<br/>");

    if week == 4 {
        html.push_str(
            "(Last week of this cycle, so make sure once-per-rotation items get done!)<br/><br/>",
        );
    } else {
        let _ = write!(html, "(Week #{week} of this chore cycle.)<br/><br/>");
    }

    html.push_str("<table><tr><th>Name</th><th>Chore</th></tr>");
    for (chore, person) in plan.state.current.iter() {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            roster.person_name(person),
            roster.chore_name(chore)
        );
    }
    html.push_str("</table><br/>");

    html.push_str("Cheers,<br/>House Manager");

    html.push_str(
        "<style>\
         table {border-collapse: collapse;}\
         td {border: 1px solid #ddd;}\
         th{background-color: skyblue;}\
         tr:nth-child(even){background-color: #f2f2f2;}\
         </style></html>",
    );

    html
}

/// Write the rendered email body to a file
pub fn write_email<P: AsRef<Path>>(path: P, html: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write email file: {}", path.display()))
}

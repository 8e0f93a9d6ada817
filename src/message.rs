//! Commit-message transformations: the `Differential Revision:` trailer,
//! the Arcanist submission template, and metadata scans over commit titles.

const REVISION_TRAILER: &str = "Differential Revision:";

/// Fields used to render an Arcanist submission message.
///
/// Absent fields render as empty segments; the section headers always appear.
#[derive(Debug, Clone, Default)]
pub struct RevisionFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub reviewers: Option<String>,
    pub bug_id: Option<u32>,
    pub depends_on: Option<String>,
}

/// Render the fixed-shape message Arcanist expects for a revision.
pub fn arc_message(fields: &RevisionFields) -> String {
    let bug_id = fields.bug_id.map(|n| n.to_string()).unwrap_or_default();
    format!(
        "{title}\n\nSummary:\n{body}\n\n{depends_on}\n\nTest Plan:\n\n\
         Reviewers: {reviewers}\n\nSubscribers:\n\nBug #: {bug_id}",
        title = fields.title.as_deref().unwrap_or(""),
        body = fields.body.as_deref().unwrap_or(""),
        depends_on = fields.depends_on.as_deref().unwrap_or(""),
        reviewers = fields.reviewers.as_deref().unwrap_or(""),
    )
}

/// Remove any `Differential Revision:` trailer line from a commit message,
/// collapsing the blank lines that separated it from the body.
pub fn strip_revision_trailer(body: &str) -> String {
    let kept: Vec<&str> = body
        .lines()
        .filter(|line| !line.trim_start().starts_with(REVISION_TRAILER))
        .collect();
    kept.join("\n").trim_end().to_string()
}

/// Replace any existing trailer with one pointing at `url`.
///
/// A non-empty message is separated from the trailer by exactly one blank
/// line; an empty message yields just the trailer with its leading newline.
pub fn amend_revision_url(body: &str, url: &str) -> String {
    let mut amended = strip_revision_trailer(body);
    if !amended.is_empty() {
        amended.push('\n');
    }
    amended.push_str("\nDifferential Revision: ");
    amended.push_str(url);
    amended
}

/// Extract the revision URL from an existing trailer, if any.
pub fn revision_url(body: &str) -> Option<&str> {
    body.lines()
        .find_map(|line| line.trim_start().strip_prefix(REVISION_TRAILER))
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

/// The `D<number>` tail of a revision URL.
pub fn revision_id(url: &str) -> Option<&str> {
    let id = url.trim_end_matches('/').rsplit('/').next()?;
    let digits = id.strip_prefix('D')?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(id)
    } else {
        None
    }
}

/// Split a full commit message into its title line and the remaining body.
pub fn split_title(message: &str) -> (&str, &str) {
    match message.split_once('\n') {
        Some((title, body)) => (title.trim_end(), body.trim_start_matches('\n')),
        None => (message.trim_end(), ""),
    }
}

/// Find the first bug number in a string, based on a 'bug 123' pattern.
pub fn find_bug_id(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i + 3 < len {
        let at_boundary = i == 0 || !bytes[i - 1].is_ascii_alphanumeric();
        if at_boundary
            && bytes[i].to_ascii_lowercase() == b'b'
            && bytes[i + 1].to_ascii_lowercase() == b'u'
            && bytes[i + 2].to_ascii_lowercase() == b'g'
        {
            let mut j = i + 3;
            while j < len && (bytes[j] == b' ' || bytes[j] == b'\t') {
                j += 1;
            }

            if j > i + 3 {
                let mut value: u32 = 0;
                let mut found_digit = false;

                while j < len && bytes[j].is_ascii_digit() {
                    found_digit = true;
                    value = value
                        .saturating_mul(10)
                        .saturating_add((bytes[j] - b'0') as u32);
                    j += 1;
                }

                if found_digit {
                    return Some(value);
                }
            }
        }
        i += 1;
    }

    None
}

/// Collect reviewer names from `r=name` / `r?name` specifiers in a title.
pub fn find_reviewers(title: &str) -> Vec<String> {
    let mut reviewers = Vec::new();

    for token in title.split_whitespace() {
        let token = token.trim_end_matches(['.', ',', ';']);
        let names = token
            .strip_prefix("r=")
            .or_else(|| token.strip_prefix("r?"));
        if let Some(names) = names {
            for name in names.split(',').filter(|n| !n.is_empty()) {
                reviewers.push(name.to_string());
            }
        }
    }

    reviewers
}

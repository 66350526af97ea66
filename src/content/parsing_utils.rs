use std::str::Lines;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::Value;

const FRONTMATTER_FENCE: &str = "---";

/// Which metadata block syntax a content unit starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `---` delimited YAML
    Frontmatter,
    /// `[KEY]: # (value)` lines, optionally inside `<!--` and `-->`
    Texted,
}

impl HeaderStyle {
    pub fn detect(content: &str) -> HeaderStyle {
        match content.lines().map(str::trim).find(|line| !line.is_empty()) {
            Some(FRONTMATTER_FENCE) => HeaderStyle::Frontmatter,
            _ => HeaderStyle::Texted,
        }
    }
}

/// Metadata values exactly as written, before validation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawHeader {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub published_date: Option<String>,
}

impl RawHeader {
    /// Keys are matched ignoring case, `_` and `-`, so `publishedDate`,
    /// `PUBLISHED_DATE` and `published-date` are the same field.
    /// Unknown keys are extension fields and are dropped.
    fn set(&mut self, key: &str, value: &str) {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        let slot = match normalized.as_str() {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "category" => &mut self.category,
            "publisheddate" | "date" => &mut self.published_date,
            _ => return,
        };

        let value = value.trim();
        if !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.published_date.is_none()
    }
}

/// Frontmatter fields the indexer reads. Any other key is an extension field and is ignored.
#[derive(Debug, Default, Deserialize)]
struct FrontmatterHeader {
    #[serde(default, deserialize_with = "scalar")]
    title: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    description: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    category: Option<String>,
    #[serde(rename = "publishedDate", alias = "published_date", alias = "date", default, deserialize_with = "scalar")]
    published_date: Option<String>,
}

impl From<FrontmatterHeader> for RawHeader {
    fn from(header: FrontmatterHeader) -> Self {
        RawHeader {
            title: non_blank(header.title),
            description: non_blank(header.description),
            category: non_blank(header.category),
            published_date: non_blank(header.published_date),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a YAML scalar as text, so `title: 2023` is the title "2023".
fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected a single value, found {:?}", other))),
    }
}

/// Splits a unit into its `---` delimited frontmatter block and the rest.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str), String> {
    let mut offset = 0;
    let mut block_start = None;

    for line in content.split_inclusive('\n') {
        let line_end = offset + line.len();
        let trimmed = line.trim();
        match block_start {
            None if trimmed.is_empty() => {}
            None if trimmed == FRONTMATTER_FENCE => block_start = Some(line_end),
            None => break,
            Some(start) if trimmed == FRONTMATTER_FENCE => {
                return Ok((&content[start..offset], &content[line_end..]));
            }
            Some(_) => {}
        }
        offset = line_end;
    }

    match block_start {
        Some(_) => Err("End of frontmatter block is missing".to_string()),
        None => Err("Frontmatter block must start with ---".to_string()),
    }
}

pub fn parse_frontmatter(content: &str) -> Result<(RawHeader, &str), String> {
    let (block, rest) = split_frontmatter(content)?;
    let header: FrontmatterHeader = if block.trim().is_empty() {
        FrontmatterHeader::default()
    } else {
        serde_yaml::from_str(block).map_err(|e| format!("Invalid frontmatter: {}", e))?
    };
    Ok((header.into(), rest))
}

pub fn parse_texted_header(lines: Lines<'_>) -> Result<(RawHeader, Lines<'_>, Option<&str>), String> {
    let mut header = RawHeader::default();
    let mut lines = lines;
    let mut maybe_line = lines.next();

    // Skip optional HTML comment in the beginning
    let mut start_with_comment = false;
    while let Some(line) = maybe_line {
        let line = line.trim();
        if line.is_empty() {
            maybe_line = lines.next();
            continue;
        }
        if line == "<!--" {
            maybe_line = lines.next();
            start_with_comment = true;
        }
        break;
    }

    while let Some(line) = maybe_line {
        if !line.trim().is_empty() {
            match extract_texted_header(line) {
                Some((key, val)) => header.set(key, val),
                None => break,
            }
        }
        maybe_line = lines.next();
    }

    if start_with_comment {
        loop {
            match maybe_line.map(str::trim) {
                Some("-->") => {
                    maybe_line = lines.next();
                    break;
                }
                Some(_) => maybe_line = lines.next(),
                None => return Err("End of comment in the header is missing".to_string()),
            }
        }
    }

    if header.is_empty() {
        return Err("No metadata header found".to_string());
    }

    Ok((header, lines, maybe_line))
}

/// Takes a leading `# Title` line. Anything else leaves the lines untouched.
pub fn take_heading_title<'a>(mut lines: Lines<'a>, mut maybe_line: Option<&'a str>) -> (Option<String>, Lines<'a>, Option<&'a str>) {
    while let Some(line) = maybe_line {
        if !line.trim().is_empty() {
            break;
        }
        maybe_line = lines.next();
    }

    match maybe_line.and_then(|line| line.strip_prefix("# ")) {
        Some(title) => {
            let title = title.trim().to_string();
            let next = lines.next();
            (Some(title), lines, next)
        }
        None => (None, lines, maybe_line),
    }
}

/// Everything after the header, with leading blank lines dropped.
pub fn collect_body<'a>(mut maybe_line: Option<&'a str>, mut lines: Lines<'a>) -> String {
    while let Some(line) = maybe_line {
        if !line.trim().is_empty() {
            break;
        }
        maybe_line = lines.next();
    }

    let mut body = String::new();
    while let Some(line) = maybe_line {
        body.push_str(line);
        body.push('\n');
        maybe_line = lines.next();
    }
    body
}

fn extract_texted_header(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref HEADER_REGEX: Regex = Regex::new(r"\[(?P<key>\w+)\]: # \((?P<value>.+)\)").unwrap();
    }
    extract_header_key_val(line, &HEADER_REGEX)
}

fn extract_header_key_val<'a>(line: &'a str, header_regex: &Regex) -> Option<(&'a str, &'a str)> {
    header_regex.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map(|val| val.as_str());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_texted_header() {
        let res = extract_texted_header("[TITLE]: # (Writing Systems)");
        assert_eq!(res, Some(("TITLE", "Writing Systems")));
        let res = extract_texted_header("[DATE]: # (2022-04-02 12:05:00.000)");
        assert_eq!(res, Some(("DATE", "2022-04-02 12:05:00.000")));

        let res = extract_texted_header("[AUTHOR]: (richard)");
        assert!(res.is_none());
    }

    #[test]
    fn test_header_key_aliases() {
        let mut header = RawHeader::default();
        header.set("PUBLISHED_DATE", "2023-01-01");
        header.set("Category", "tech");
        header.set("author", "ignored");
        assert_eq!(header.published_date.as_deref(), Some("2023-01-01"));
        assert_eq!(header.category.as_deref(), Some("tech"));
        assert!(header.title.is_none());

        let mut header = RawHeader::default();
        header.set("date", "2023-02-01");
        header.set("title", "   ");
        assert_eq!(header.published_date.as_deref(), Some("2023-02-01"));
        assert!(header.title.is_none());
    }

    #[test]
    fn test_detect_style() {
        assert_eq!(HeaderStyle::detect("\n\n---\ntitle: x\n---\n"), HeaderStyle::Frontmatter);
        assert_eq!(HeaderStyle::detect("<!--\n[DATE]: # (2023-01-01)\n-->"), HeaderStyle::Texted);
        assert_eq!(HeaderStyle::detect(""), HeaderStyle::Texted);
    }

    #[test]
    fn test_frontmatter() {
        let content = "---\ntitle: \"Writing Systems\"\ndescription: On scripts\ntags:\n  - a\npublishedDate: 2023-06-01\n---\n\nBody line\n";
        let (header, rest) = parse_frontmatter(content).unwrap();
        assert_eq!(header.title.as_deref(), Some("Writing Systems"));
        assert_eq!(header.description.as_deref(), Some("On scripts"));
        assert_eq!(header.published_date.as_deref(), Some("2023-06-01"));
        assert_eq!(header.category, None);
        assert_eq!(rest, "\nBody line\n");
    }

    #[test]
    fn test_frontmatter_comments() {
        let content = "---\n# imported\ntitle: Moved # renamed later\npublishedDate: 2023-06-01 # moved from old blog\n---\n";
        let (header, _) = parse_frontmatter(content).unwrap();
        assert_eq!(header.title.as_deref(), Some("Moved"));
        assert_eq!(header.published_date.as_deref(), Some("2023-06-01"));
    }

    #[test]
    fn test_frontmatter_multi_line_values() {
        let content = "---\ntitle: |\n  First line\n  Second line\ndescription: >\n  A long summary\n  over two lines\n---\n";
        let (header, _) = parse_frontmatter(content).unwrap();
        assert_eq!(header.title.as_deref(), Some("First line\nSecond line"));
        assert_eq!(header.description.as_deref(), Some("A long summary over two lines"));
    }

    #[test]
    fn test_frontmatter_quoted_values() {
        let content = "---\ntitle: 'It''s here'\ndescription: \"Say \\\"hi\\\"\"\ncategory: '  '\n---\n";
        let (header, _) = parse_frontmatter(content).unwrap();
        assert_eq!(header.title.as_deref(), Some("It's here"));
        assert_eq!(header.description.as_deref(), Some("Say \"hi\""));
        assert_eq!(header.category, None);
    }

    #[test]
    fn test_frontmatter_extension_fields() {
        let content = "---\ntitle: 2023\ndate: 2023-01-01 10:30\nauthor:\n  name: Ana\n  links: [a, b]\ndraft: false\n---\n";
        let (header, _) = parse_frontmatter(content).unwrap();
        assert_eq!(header.title.as_deref(), Some("2023"));
        assert_eq!(header.published_date.as_deref(), Some("2023-01-01 10:30"));
    }

    #[test]
    fn test_frontmatter_invalid_yaml() {
        let err = parse_frontmatter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(err.starts_with("Invalid frontmatter"), "{}", err);

        let err = parse_frontmatter("---\ntitle:\n  nested: map\n---\n").unwrap_err();
        assert!(err.starts_with("Invalid frontmatter"), "{}", err);
    }

    #[test]
    fn test_frontmatter_empty_block() {
        let (header, rest) = parse_frontmatter("---\n---\nBody\n").unwrap();
        assert!(header.is_empty());
        assert_eq!(rest, "Body\n");
    }

    #[test]
    fn test_frontmatter_not_closed() {
        let content = "---\ntitle: Open\n";
        let err = parse_frontmatter(content).unwrap_err();
        assert_eq!(err, "End of frontmatter block is missing");

        let err = parse_frontmatter("title: Open\n").unwrap_err();
        assert_eq!(err, "Frontmatter block must start with ---");
    }

    #[test]
    fn test_collect_body_after_header() {
        let content = "\n\nFirst\n\nSecond";
        let mut lines = content.lines();
        let first = lines.next();
        assert_eq!(collect_body(first, lines), "First\n\nSecond\n");
    }

    #[test]
    fn test_lines_texted() {
        let content = r##"

<!--

[DATE]: # (2024-02-12 22:54:00.000)

[CATEGORY]: # (life)

-->

# A title from the heading
First line"##;

        let (header, lines, maybe_line) = parse_texted_header(content.lines()).unwrap();
        assert_eq!(header.published_date.as_deref(), Some("2024-02-12 22:54:00.000"));
        assert_eq!(header.category.as_deref(), Some("life"));
        assert_eq!(header.title, None);

        let (title, lines, maybe_line) = take_heading_title(lines, maybe_line);
        assert_eq!(title.as_deref(), Some("A title from the heading"));
        assert_eq!(collect_body(maybe_line, lines), "First line\n");
    }

    #[test]
    fn test_texted_comment_not_closed() {
        let content = "<!--\n[DATE]: # (2024-02-12)\n\n# Title\n";
        let err = parse_texted_header(content.lines()).unwrap_err();
        assert_eq!(err, "End of comment in the header is missing");
    }

    #[test]
    fn test_texted_without_header() {
        let content = "# Just a heading\n\nSome text";
        assert!(parse_texted_header(content.lines()).is_err());
    }

    #[test]
    fn test_heading_title_absent() {
        let content = "\nnot a heading\n# later heading";
        let mut lines = content.lines();
        let first = lines.next();
        let (title, lines, maybe_line) = take_heading_title(lines, first);
        assert!(title.is_none());
        assert_eq!(collect_body(maybe_line, lines), "not a heading\n# later heading\n");
    }
}

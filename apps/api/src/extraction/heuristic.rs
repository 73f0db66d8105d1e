//! Heuristic extractor — regex and vocabulary matching over document text.
//!
//! Deterministic and offline. Section headers ("Experience", "Education", ...)
//! scope the experience and degree lookups; everything else scans the whole text.

use std::path::Path;
use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::{Datelike, Local};
use regex::Regex;
use tracing::debug;

use crate::extraction::document::read_document_text;
use crate::extraction::vocabulary::{section_for_header, Section, SKILLS};
use crate::extraction::{ExtractedFields, ExtractionError, ExtractionOutcome, ResumeExtractor};

/// Lines scanned for a candidate name at the top of the document.
const NAME_SCAN_LINES: usize = 5;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;
/// A digit group this long is a complete subscriber number on its own.
const SUBSCRIBER_GROUP_DIGITS: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResumeExtractor for HeuristicExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractionOutcome, ExtractionError> {
        let text = read_document_text(path).await?;
        let fields = extract_fields(&text, Local::now().year());
        debug!(
            skills = fields.skills.len(),
            degrees = fields.degree.len(),
            experience = fields.experience.len(),
            "Heuristic extraction finished"
        );
        Ok(fields.into_outcome())
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

struct Patterns {
    email: Regex,
    phone: Regex,
    degree: Regex,
    engineering_degree: Regex,
    college: Regex,
    role_at_company: Regex,
    year_range: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern"),
        phone: Regex::new(r"\+?\(?\d[\d \t().-]{8,}\d").expect("phone pattern"),
        degree: Regex::new(
            r"(?i)(?:^|[^a-z])(b\.?\s?sc|m\.?\s?sc|b\.?\s?tech|m\.?\s?tech|b\.e\.?|m\.e\.?|b\.com|m\.com|b\.a\.|m\.a\.|bca|mca|mba|ph\.?\s?d|bachelor(?:['’]?s)?|master(?:['’]?s|\s+of|\s+in)|diploma)(?:[^a-z]|$)",
        )
        .expect("degree pattern"),
        // Bare BE/ME only in capitals and followed by a subject, so "be" and "ME" alone don't count.
        engineering_degree: Regex::new(r"\b[BM]\.?E\.?\s+(?:in\s+|\(\s*)?[A-Z]")
            .expect("engineering degree pattern"),
        college: Regex::new(r"(?i)\b(university|college|institute|academy|school of)\b")
            .expect("college pattern"),
        role_at_company: Regex::new(r"(?i)^(?P<role>.+?)\s+at\s+(?P<company>.+)$")
            .expect("role pattern"),
        year_range: Regex::new(
            r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*((?:19|20)\d{2}|present|current|now)\b",
        )
        .expect("year range pattern"),
    })
}

/// Pulls every field the heuristics know about out of `text`.
/// `current_year` resolves open-ended ranges such as "2021 - Present".
pub fn extract_fields(text: &str, current_year: i32) -> ExtractedFields {
    let p = patterns();
    let blocks = split_sections(text);

    let experience: Vec<String> = lines_in(&blocks, Section::Experience)
        .into_iter()
        .map(strip_bullet)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    // Degrees and colleges come from the education section when the resume has one.
    let education_lines = lines_in(&blocks, Section::Education);
    let education_scope = if education_lines.is_empty() {
        blocks.iter().flat_map(|(_, lines)| lines.iter().copied()).collect()
    } else {
        education_lines
    };

    let (designation, company_names) = roles_and_companies(&experience);

    ExtractedFields {
        name: find_name(&blocks),
        email: p.email.find(text).map(|m| m.as_str().to_string()),
        mobile_number: find_phone(text),
        degree: find_degrees(&education_scope),
        college_name: find_college(&education_scope),
        skills: find_skills(text),
        company_names,
        designation,
        total_experience: total_experience_years(&experience, current_year),
        experience,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn split_sections(text: &str) -> Vec<(Section, Vec<&str>)> {
    let mut blocks: Vec<(Section, Vec<&str>)> = vec![(Section::Preamble, Vec::new())];
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(section) = section_for_header(trimmed) {
            blocks.push((section, Vec::new()));
        } else if let Some((_, lines)) = blocks.last_mut() {
            lines.push(trimmed);
        }
    }
    blocks
}

fn lines_in<'a>(blocks: &[(Section, Vec<&'a str>)], section: Section) -> Vec<&'a str> {
    blocks
        .iter()
        .filter(|(s, _)| *s == section)
        .flat_map(|(_, lines)| lines.iter().copied())
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| matches!(c, '-' | '•' | '*' | '·' | '–' | '▪'))
        .trim()
}

/// Removes year ranges and the punctuation they leave behind.
fn strip_dates(text: &str) -> String {
    patterns()
        .year_range
        .replace_all(text, "")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | ',' | '|' | '-' | '–'))
        .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Field finders
// ────────────────────────────────────────────────────────────────────────────

fn find_name(blocks: &[(Section, Vec<&str>)]) -> Option<String> {
    let (section, lines) = blocks.first()?;
    if *section != Section::Preamble {
        return None;
    }
    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .find(|l| looks_like_name(l))
        .map(|l| l.to_string())
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            w.chars().next().is_some_and(char::is_uppercase)
                && w.chars()
                    .all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''))
        })
}

fn find_phone(text: &str) -> Option<String> {
    let p = patterns();
    // Date ranges sit next to numbers often enough to swallow them.
    let text = p.year_range.replace_all(text, "\n");
    p.phone
        .find_iter(&text)
        .find_map(|m| trim_phone(m.as_str()))
        .map(String::from)
}

/// Longest leading run of digit groups that still reads as one number.
/// Stops early once a full subscriber group has been taken, so trailing
/// digits ("9876543210 2019") are left behind.
fn trim_phone(candidate: &str) -> Option<&str> {
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut len = 0;
    for (i, c) in candidate.char_indices() {
        if !c.is_ascii_digit() {
            continue;
        }
        len += 1;
        if !candidate[i + 1..].starts_with(|n: char| n.is_ascii_digit()) {
            groups.push((len, i + 1));
            len = 0;
        }
    }

    let mut total = 0;
    let mut end = 0;
    for (len, group_end) in groups {
        if total + len > MAX_PHONE_DIGITS {
            break;
        }
        total += len;
        end = group_end;
        if total >= MIN_PHONE_DIGITS && len >= SUBSCRIBER_GROUP_DIGITS {
            break;
        }
    }

    (total >= MIN_PHONE_DIGITS).then(|| &candidate[..end])
}

fn is_degree(part: &str) -> bool {
    let p = patterns();
    p.degree.is_match(part) || p.engineering_degree.is_match(part)
}

fn find_degrees(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            line.split([',', '|'])
                .map(str::trim)
                .find(|part| is_degree(part))
        })
        .map(|part| strip_dates(strip_bullet(part)))
        .filter(|d| !d.is_empty())
        .collect()
}

fn find_college(lines: &[&str]) -> Option<String> {
    let college = &patterns().college;
    lines
        .iter()
        .find_map(|line| {
            line.split([',', '|'])
                .map(str::trim)
                .find(|part| college.is_match(part))
        })
        .map(|part| strip_dates(strip_bullet(part)))
        .filter(|c| !c.is_empty())
}

/// Skills from the vocabulary, in order of first appearance.
fn find_skills(text: &str) -> Vec<String> {
    let haystack = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let mut found: Vec<(usize, &str)> = SKILLS
        .iter()
        .filter_map(|skill| find_phrase(&haystack, &skill.to_lowercase()).map(|pos| (pos, *skill)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, skill)| skill.to_string()).collect()
}

/// Position of the first whole-phrase occurrence of `needle`.
fn find_phrase(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        // A leading dot belongs to the previous token ("node.js" is not "js").
        !before.is_some_and(|c| is_skill_char(c) || c == '.') && !after.is_some_and(is_skill_char)
    })
}

fn is_skill_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Splits "Role at Company" lines. The first role is the designation.
fn roles_and_companies(experience: &[String]) -> (Option<String>, Vec<String>) {
    let role_at_company = &patterns().role_at_company;
    let mut designation = None;
    let mut companies: Vec<String> = Vec::new();

    for line in experience {
        let Some(caps) = role_at_company.captures(line) else {
            continue;
        };
        let company = caps["company"]
            .split([',', '|'])
            .next()
            .map(strip_dates)
            .unwrap_or_default();
        if company.is_empty() {
            continue;
        }
        if designation.is_none() {
            designation = Some(strip_dates(&caps["role"])).filter(|r| !r.is_empty());
        }
        if !companies.contains(&company) {
            companies.push(company);
        }
    }

    (designation, companies)
}

/// Sum of all year ranges in the experience lines, in years.
fn total_experience_years(experience: &[String], current_year: i32) -> Option<f64> {
    let year_range = &patterns().year_range;
    let mut total = 0;
    let mut found = false;

    for line in experience {
        for caps in year_range.captures_iter(line) {
            let Ok(start) = caps[1].parse::<i32>() else {
                continue;
            };
            let end = match caps[2].to_lowercase().as_str() {
                "present" | "current" | "now" => current_year,
                year => match year.parse::<i32>() {
                    Ok(y) => y,
                    Err(_) => continue,
                },
            };
            if end >= start {
                total += end - start;
                found = true;
            }
        }
    }

    found.then_some(f64::from(total))
}

//! Changelog rendering and document maintenance
//!
//! Rendering is a pure function of its inputs so re-rendering the same
//! release yields byte-identical output. The release date is therefore
//! an explicit argument, never read from a clock here.

use crate::config::{SectionEntry, UrlFormats};
use crate::domain::{CommitRecord, CommitType, VersionTag};
use crate::template;
use regex::Regex;
use std::collections::HashMap;

/// Inputs identifying one rendered release section
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    pub current_tag: VersionTag,
    pub previous_tag: Option<String>,
    /// Release date, preformatted (YYYY-MM-DD)
    pub date: String,
}

/// Renders release sections grouped by the configured section mapping
pub struct ChangelogRenderer {
    mapping: Vec<SectionEntry>,
    urls: UrlFormats,
}

impl ChangelogRenderer {
    pub fn new(mapping: Vec<SectionEntry>, urls: UrlFormats) -> Self {
        ChangelogRenderer { mapping, urls }
    }

    /// Render the changelog section for one release.
    ///
    /// Sections appear in mapping order; hidden and unmapped types are
    /// excluded entirely. Within a section, commits are listed
    /// most-recent-first (input order is chronological, oldest first).
    pub fn render(&self, commits: &[CommitRecord], ctx: &ReleaseContext) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} ({})\n",
            self.release_title(ctx),
            ctx.date
        ));

        for entry in &self.mapping {
            if entry.hidden {
                continue;
            }

            let commit_type = CommitType::from_token(&entry.r#type);
            let group: Vec<&CommitRecord> = commits
                .iter()
                .filter(|c| c.commit_type == commit_type)
                .collect();

            if group.is_empty() {
                continue;
            }

            out.push_str(&format!("\n### {}\n\n", entry.section));

            for commit in group.iter().rev() {
                out.push_str(&self.render_entry(commit));
                out.push('\n');
            }
        }

        out
    }

    /// Version heading, linked against the previous tag when possible
    fn release_title(&self, ctx: &ReleaseContext) -> String {
        let version = ctx.current_tag.version.to_string();

        match (&self.urls.compare_url_format, &ctx.previous_tag) {
            (Some(format), Some(previous)) => {
                let mut vars = HashMap::new();
                vars.insert("previousTag", previous.clone());
                vars.insert("currentTag", ctx.current_tag.to_string());
                format!("[{}]({})", version, template::render(format, &vars))
            }
            _ => version,
        }
    }

    /// One bullet: scope, subject with issue links, commit link
    fn render_entry(&self, commit: &CommitRecord) -> String {
        let mut line = String::from("* ");

        if let Some(scope) = &commit.scope {
            line.push_str(&format!("**{}:** ", scope));
        }

        let subject = self.link_issues(&commit.subject);
        line.push_str(&self.link_users(&subject));

        match &self.urls.commit_url_format {
            Some(format) => {
                let url = template::render(format, &template::single("hash", &commit.hash));
                line.push_str(&format!(" ([{}]({}))", commit.short_hash(), url));
            }
            None => {
                line.push_str(&format!(" ({})", commit.short_hash()));
            }
        }

        line
    }

    /// Replace `#123` issue references with links when a format is set
    fn link_issues(&self, subject: &str) -> String {
        let Some(format) = &self.urls.issue_url_format else {
            return subject.to_string();
        };

        let re = Regex::new(r"#(\d+)").expect("issue reference pattern is valid");
        re.replace_all(subject, |caps: &regex::Captures<'_>| {
            let id = &caps[1];
            let url = template::render(format, &template::single("id", id));
            format!("[#{}]({})", id, url)
        })
        .into_owned()
    }

    /// Replace `@user` mentions with links when a format is set
    fn link_users(&self, subject: &str) -> String {
        let Some(format) = &self.urls.user_url_format else {
            return subject.to_string();
        };

        let re = Regex::new(r"@([A-Za-z0-9][A-Za-z0-9-]*)").expect("user mention pattern is valid");
        re.replace_all(subject, |caps: &regex::Captures<'_>| {
            let user = &caps[1];
            let url = template::render(format, &template::single("user", user));
            format!("[@{}]({})", user, url)
        })
        .into_owned()
    }
}

/// Prepend a rendered section to existing changelog content.
///
/// The static header stays exactly once at the top of the document; the
/// previous releases follow the new section untouched.
pub fn update_document(existing: &str, header: &str, section: &str) -> String {
    let body = existing
        .strip_prefix(header)
        .unwrap_or(existing)
        .trim_start_matches('\n');

    let mut doc = String::new();
    doc.push_str(header);
    doc.push('\n');
    doc.push_str(section);
    if !body.is_empty() {
        doc.push('\n');
        doc.push_str(body);
    }
    doc
}

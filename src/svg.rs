use crate::portfolio::{Education, EducationKind, Portfolio, ProjectFilter};
use crate::state::GithubSection;
use chrono::NaiveDate;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 50;
const DETAIL_INDENT: usize = 2;

pub const LOAD_ERROR_MESSAGE: &str =
    "Unable to load GitHub repositories. Please try again later.";

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub star: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                star: "#e3b341",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                star: "#9a6700",
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Groups digits in threes: `12345` becomes `12,345`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

enum Line {
    Header(String),
    Blank,
    Stat(String, String),
    Repo {
        name: String,
        stars: String,
        forks: String,
        languages: String,
    },
    Note(String),
    Detail(String),
}

impl Line {
    fn width(&self) -> usize {
        match self {
            Line::Header(_) | Line::Blank => 0,
            Line::Stat(k, v) => k.chars().count() + 2 + v.chars().count(),
            Line::Repo {
                name,
                stars,
                forks,
                languages,
            } => {
                name.chars().count()
                    + 2
                    + repo_value(stars, forks, languages).chars().count()
            }
            Line::Note(text) => text.chars().count(),
            Line::Detail(text) => DETAIL_INDENT + text.chars().count(),
        }
    }
}

fn repo_value(stars: &str, forks: &str, languages: &str) -> String {
    format!("{stars} stars, {forks} forks [{languages}]")
}

/// Greedy word wrap; a single overlong word stays on its own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            out.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

fn push_section(lines: &mut Vec<Line>, title: &str) {
    lines.push(Line::Blank);
    lines.push(Line::Header(format!("- {title}")));
}

fn push_prose(lines: &mut Vec<Line>, text: &str) {
    lines.extend(wrap(text, MIN_COL_CHARS).into_iter().map(Line::Note));
}

fn push_educations(lines: &mut Vec<Line>, title: &str, entries: &[&Education]) {
    if entries.is_empty() {
        return;
    }
    push_section(lines, title);
    for e in entries {
        lines.push(Line::Stat(
            e.degree.clone(),
            format!("{}, {}", e.institution, e.period),
        ));
    }
}

fn collect_lines(portfolio: &Portfolio, section: &GithubSection) -> Vec<Line> {
    let mut lines = Vec::new();

    let handle = if portfolio.github_username.is_empty() {
        portfolio.name.clone()
    } else {
        format!("{}@github", portfolio.github_username)
    };
    lines.push(Line::Header(handle));
    lines.push(Line::Stat("Name".into(), portfolio.name.clone()));
    lines.push(Line::Stat("Title".into(), portfolio.title.clone()));
    if !portfolio.about.skills.is_empty() {
        lines.push(Line::Stat("Skills".into(), portfolio.about.skills.join(", ")));
    }
    if !portfolio.about.interests.is_empty() {
        lines.push(Line::Stat(
            "Interests".into(),
            portfolio.about.interests.join(", "),
        ));
    }

    if !portfolio.short_bio.is_empty() || !portfolio.about.description.is_empty() {
        push_section(&mut lines, "About");
        push_prose(&mut lines, &portfolio.short_bio);
        push_prose(&mut lines, &portfolio.about.description);
    }

    if !portfolio.experiences.is_empty() {
        push_section(&mut lines, "Experience");
        for x in &portfolio.experiences {
            lines.push(Line::Stat(
                format!("{} @ {}", x.role, x.company),
                x.period.clone(),
            ));
            if !x.technologies.is_empty() {
                lines.push(Line::Detail(x.technologies.join(", ")));
            }
        }
    }

    push_educations(
        &mut lines,
        "Education",
        &portfolio.educations_of(EducationKind::Education),
    );
    push_educations(
        &mut lines,
        "Certifications",
        &portfolio.educations_of(EducationKind::Certification),
    );

    if !portfolio.projects.is_empty() {
        push_section(&mut lines, "Projects");
        for filter in portfolio.categories() {
            let ProjectFilter::Category(category) = &filter else {
                continue;
            };
            for p in portfolio.projects_in(&filter) {
                let detail = if p.technologies.is_empty() {
                    p.description.clone()
                } else {
                    p.technologies.join(", ")
                };
                lines.push(Line::Stat(format!("{category}.{}", p.title), detail));
            }
        }
    }

    if !portfolio.social_links.is_empty() {
        push_section(&mut lines, "Contact");
        for link in &portfolio.social_links {
            lines.push(Line::Stat(
                link.platform.label().to_string(),
                link.display().to_string(),
            ));
        }
    }

    push_section(&mut lines, "GitHub Stats");
    for item in section.stat_items() {
        lines.push(Line::Stat(item.label.to_string(), format_count(item.value)));
    }

    if section.error.is_some() {
        push_section(&mut lines, "Top Repositories");
        lines.push(Line::Note(LOAD_ERROR_MESSAGE.to_string()));
    } else if !section.top_repos.is_empty() {
        push_section(&mut lines, "Top Repositories");
        for repo in &section.top_repos {
            lines.push(Line::Repo {
                name: repo.name.clone(),
                stars: format_count(repo.stars),
                forks: format_count(repo.forks),
                languages: repo.display_languages().join(", "),
            });
            let description = repo
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(NO_DESCRIPTION);
            lines.extend(
                wrap(description, MIN_COL_CHARS)
                    .into_iter()
                    .map(Line::Detail),
            );
        }
    }

    lines
}

/// Renders the portfolio card for one theme.
pub fn generate_svg(
    portfolio: &Portfolio,
    section: &GithubSection,
    generated_at: NaiveDate,
    theme: Theme,
) -> String {
    let colors = theme.colors();
    let lines = collect_lines(portfolio, section);

    let align_width = lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .max(MIN_COL_CHARS);

    let x = LEFT_PADDING;
    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(label) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{x}" y="{y}">{}</tspan>
"#,
                    escape_xml(&build_header_line(label, align_width))
                ));
            }
            Line::Stat(key, value) => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{x}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
            Line::Repo {
                name,
                stars,
                forks,
                languages,
            } => {
                let value = repo_value(stars, forks, languages);
                let (k, d, _) = build_stat_row(name, &value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{x}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan>
<tspan class="star">{}</tspan><tspan class="cc"> stars, </tspan>
<tspan class="value">{}</tspan><tspan class="cc"> forks [</tspan>
<tspan class="value">{}</tspan><tspan class="cc">]</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    stars,
                    forks,
                    escape_xml(languages)
                ));
            }
            Line::Note(text) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{x}" y="{y}" class="cc">{}</tspan>
"#,
                    escape_xml(text)
                ));
            }
            Line::Detail(text) => {
                let indented = x + DETAIL_INDENT as f32 * CHAR_WIDTH;
                tspans.push_str(&format!(
                    r#"<tspan x="{indented}" y="{y}" class="cc">{}</tspan>
"#,
                    escape_xml(text)
                ));
            }
        }
    }

    let footer_y = START_Y + (lines.len() as i32 + 1) * LINE_HEIGHT;
    let w = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let h = footer_y as f32 + 20.0;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key   {{ fill: {key}; }}
.value {{ fill: {value}; }}
.cc    {{ fill: {cc}; }}
.star  {{ fill: {star}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}">
{body}<tspan x="{x}" y="{footer_y}" class="cc">Updated {date}</tspan>
</text>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        star = colors.star,
        body = tspans,
        date = generated_at.format("%Y-%m-%d"),
    )
}

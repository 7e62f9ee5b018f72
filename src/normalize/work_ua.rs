// src/normalize/work_ua.rs
//! Field extraction from work.ua HTML pages.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;

use super::{collapse_whitespace, organization_from_blob, strip_parentheses, total_experience_years};
use crate::types::{ExperienceEntry, ResumeRecord, SalaryExpectation, Site, NOT_SPECIFIED};

const CONTACTS_HEADING: &str = "Контактна інформація";
const CITY_LABEL: &str = "Місто проживання";

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("Invalid selector {}: {:?}", css, e);
            None
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(root: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = selector(css)?;
    root.select(&selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Absolute résumé links from a search results page, in page order.
pub fn extract_listing_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Some(card_links) = selector("div.resume-link a[href]") else {
        return Vec::new();
    };

    let base = base_url.trim_end_matches('/');
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&card_links) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }

        let link = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}/{}", base, href.trim_start_matches('/'))
        };

        // A card usually links its title and its avatar to the same résumé
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

/// Normalize one résumé detail page. Drops the listing only when `link` is blank.
pub fn normalize_detail_page(html: &str, link: &str) -> Option<ResumeRecord> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut record = ResumeRecord::with_defaults(link, Site::WorkUa);

    if let Some(position) = first_text(root, r#"h2[class="mt-lg sm:mt-xl"]"#) {
        record.position = position;
    }
    record.salary_expectation = salary_expectation(root);
    record.skills = skills(root);
    if let Some(location) = location(root) {
        record.location = location;
    }
    if let Some(info) = first_text(root, "#addInfo") {
        record.additional_info = info;
    }
    record.experience_entries = experience_entries(&document);
    record.experience_years = total_experience_years(&record.experience_entries);

    Some(record)
}

fn salary_expectation(root: ElementRef<'_>) -> SalaryExpectation {
    match first_text(root, "span.text-muted-print") {
        Some(text) => {
            let cleaned = text
                .replace('\u{a0}', " ")
                .replace("&nbsp;", " ")
                .replace(',', "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                SalaryExpectation::NotSpecified
            } else {
                SalaryExpectation::Text(cleaned.to_string())
            }
        }
        None => SalaryExpectation::NotSpecified,
    }
}

fn skills(root: ElementRef<'_>) -> Vec<String> {
    let (Some(items), Some(name)) = (selector("li.no-style.mr-sm.mt-sm"), selector("span.ellipsis"))
    else {
        return Vec::new();
    };

    root.select(&items)
        .map(|item| {
            item.select(&name)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        })
        .collect()
}

fn location(root: ElementRef<'_>) -> Option<String> {
    let terms = selector("dt")?;

    root.select(&terms)
        .find(|term| element_text(*term).contains(CITY_LABEL))
        .map(|term| {
            term.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "dd")
                .map(element_text)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        })
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Heading text without the nested duration span.
fn heading_title(heading: ElementRef<'_>) -> String {
    let own_text: String = heading
        .children()
        .filter_map(|child| child.value().as_text().map(|t| t.text.to_string()))
        .collect();
    let own_text = collapse_whitespace(&own_text);

    if own_text.is_empty() {
        collapse_whitespace(&element_text(heading))
    } else {
        own_text
    }
}

/// Jobs and education entries. Each heading owns the paragraphs that follow
/// it in document order, up to the next heading.
fn experience_entries(document: &Html) -> Vec<ExperienceEntry> {
    let (Some(blocks), Some(duration_span)) = (
        selector("h2.h4.strong-600, p.mb-0"),
        selector("span.text-default-7"),
    ) else {
        return Vec::new();
    };

    let ordered: Vec<ElementRef<'_>> = document.select(&blocks).collect();
    let mut entries = Vec::new();

    for (index, element) in ordered.iter().enumerate() {
        if element.value().name() != "h2" {
            continue;
        }

        let title = heading_title(*element);
        if title == CONTACTS_HEADING || element_text(*element) == CONTACTS_HEADING {
            continue;
        }

        let following: Vec<ElementRef<'_>> = ordered[index + 1..]
            .iter()
            .take_while(|el| el.value().name() != "h2")
            .copied()
            .collect();

        let company_at = following.iter().position(|el| !has_class(*el, "text-default-7"));
        let organization = company_at
            .map(|at| organization_from_blob(&element_text(following[at])))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        let note = company_at
            .and_then(|at| {
                following[at + 1..]
                    .iter()
                    .find(|el| has_class(**el, "text-default-7"))
            })
            .map(|el| element_text(*el))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        let duration = element
            .select(&duration_span)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .map(|text| strip_parentheses(&text))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        entries.push(ExperienceEntry {
            title: if title.is_empty() {
                NOT_SPECIFIED.to_string()
            } else {
                title
            },
            organization,
            duration,
            note,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://www.work.ua/resumes/1234567/";

    const DETAIL_PAGE: &str = r#"
        <html><body>
          <h2 class="mt-lg sm:mt-xl">Data Scientist</h2>
          <span class="text-muted-print">30&nbsp;000 грн</span>
          <dl>
            <dt>Вік:</dt><dd>29 років</dd>
            <dt>Місто проживання:</dt><dd> Київ </dd>
          </dl>
          <h2 class="h4 strong-600 mt-lg sm:mt-xl">Senior Analyst <span class="text-default-7">(2 роки 6 місяців)</span></h2>
          <p class="mb-0">з 01.2021 по 07.2023
              ТОВ   Дата  Лаб</p>
          <p class="text-default-7 mb-0">Аналітика продажів</p>
          <h2 class="h4 strong-600 mt-lg sm:mt-xl">Junior Analyst <span class="text-default-7">(1 рік 6 місяців)</span></h2>
          <p class="mb-0">Стартап</p>
          <h2 class="h4 strong-600 mt-lg sm:mt-xl">Контактна інформація</h2>
          <ul>
            <li class="no-style mr-sm mt-sm"><span class="ellipsis">Python</span></li>
            <li class="no-style mr-sm mt-sm"><span class="ellipsis">English</span></li>
            <li class="no-style mr-sm mt-sm"></li>
          </ul>
          <div id="addInfo">Готовий до переїзду</div>
        </body></html>
    "#;

    #[test]
    fn test_normalize_detail_page() {
        let record = normalize_detail_page(DETAIL_PAGE, LINK).unwrap();

        assert_eq!(record.position, "Data Scientist");
        assert_eq!(record.location, "Київ");
        assert_eq!(
            record.salary_expectation,
            SalaryExpectation::Text("30 000 грн".to_string())
        );
        assert_eq!(record.skills, vec!["Python", "English", NOT_SPECIFIED]);
        assert_eq!(record.additional_info, "Готовий до переїзду");
        assert_eq!(record.link, LINK);
        assert_eq!(record.site, Site::WorkUa);

        assert_eq!(record.experience_entries.len(), 2);
        let first = &record.experience_entries[0];
        assert_eq!(first.title, "Senior Analyst");
        assert_eq!(first.duration, "2 роки 6 місяців");
        assert_eq!(first.organization, "ТОВ Дата Лаб");
        assert_eq!(first.note, "Аналітика продажів");

        let second = &record.experience_entries[1];
        assert_eq!(second.organization, "Стартап");
        assert_eq!(second.note, NOT_SPECIFIED);

        assert_eq!(record.experience_years, Some(4));
    }

    #[test]
    fn test_garbage_page_yields_defaults() {
        let record = normalize_detail_page("<<not html at all", LINK).unwrap();
        assert_eq!(record, ResumeRecord::with_defaults(LINK, Site::WorkUa));
    }

    #[test]
    fn test_blank_link_is_dropped() {
        assert!(normalize_detail_page(DETAIL_PAGE, "  ").is_none());
    }

    #[test]
    fn test_extract_listing_links() {
        let html = r#"
            <div class="card card-hover card-search resume-link card-visited wordwrap">
              <a href="/resumes/111/">Designer</a>
              <a href="/resumes/111/"><img></a>
            </div>
            <div class="card card-hover card-search resume-link wordwrap">
              <a href="https://www.work.ua/resumes/222/">Developer</a>
            </div>
            <div class="card"><a href="/jobs/333/">Not a resume</a></div>
        "#;

        assert_eq!(
            extract_listing_links(html, "https://www.work.ua/"),
            vec![
                "https://www.work.ua/resumes/111/".to_string(),
                "https://www.work.ua/resumes/222/".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_cards_is_empty() {
        assert!(extract_listing_links("<html><body></body></html>", "https://www.work.ua").is_empty());
    }
}

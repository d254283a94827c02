//! PubMed source for biomedical literature
//!
//! API docs: https://www.ncbi.nlm.nih.gov/books/NBK25501/
//! Rate limit: 3 requests/second without API key, 10 with key

use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

use super::error::SourceError;
use crate::domain::{Article, ArticleAuthor, DateRange, PubDate};

#[cfg(feature = "native")]
use crate::config::PubMedConfig;
#[cfg(feature = "native")]
use crate::http::HttpClient;

pub struct PubMedSource;

impl PubMedSource {
    /// Parse PubMed XML response (efetch format) into articles.
    ///
    /// Articles without a usable publication date are skipped. Text nodes
    /// are not trimmed: inline markup (`<sub>`, `<i>`) splits a title or an
    /// affiliation into several events that are joined as written.
    pub fn parse_efetch_response(xml: &str) -> Result<Vec<Article>, SourceError> {
        let mut reader = Reader::from_str(xml);

        let mut articles = Vec::new();
        let mut buf = Vec::new();
        let mut path: Vec<String> = Vec::new();

        let mut current: Option<ArticleBuilder> = None;
        let mut author: Option<ArticleAuthor> = None;
        let mut affiliation = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                    if name == "PubmedArticle" {
                        current = Some(ArticleBuilder::default());
                    } else if name == "Author"
                        && current.is_some()
                        && path.last().map(String::as_str) == Some("AuthorList")
                    {
                        author = Some(ArticleAuthor::default());
                    } else if name == "Affiliation" {
                        affiliation.clear();
                    }

                    path.push(name);
                }
                Ok(Event::End(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    path.pop();

                    match name.as_str() {
                        "PubmedArticle" => {
                            if let Some(builder) = current.take() {
                                let pmid = builder.pmid.clone();
                                match builder.build() {
                                    Some(article) => articles.push(article),
                                    None => tracing::warn!(
                                        pmid = %pmid,
                                        "Skipping article without a parseable publication date"
                                    ),
                                }
                            }
                        }
                        "Author" => {
                            if let (Some(done), Some(article)) = (author.take(), current.as_mut()) {
                                article.authors.push(done);
                            }
                        }
                        "Affiliation" => {
                            if let Some(author) = author.as_mut() {
                                let text = squeeze(&affiliation);
                                if !text.is_empty() {
                                    author.affiliations.push(text);
                                }
                            }
                            affiliation.clear();
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(article) = current.as_mut() {
                        match e.unescape() {
                            Ok(text) => article.accept_text(
                                &path,
                                &text,
                                author.as_mut(),
                                &mut affiliation,
                            ),
                            Err(err) => tracing::warn!(
                                pmid = %article.pmid,
                                element = path.last().map(String::as_str).unwrap_or_default(),
                                error = %err,
                                "Skipping unreadable text node"
                            ),
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(SourceError::Parse(format!(
                        "XML parse error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        tracing::debug!(articles = articles.len(), "Parsed efetch response");
        Ok(articles)
    }

    /// Parse esearch response to get PMIDs
    pub fn parse_esearch_response(xml: &str) -> Result<Vec<String>, SourceError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut pmids = Vec::new();
        let mut buf = Vec::new();
        let mut in_id = false;
        let mut in_error = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"Id" => in_id = true,
                    b"ERROR" => in_error = true,
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"Id" => in_id = false,
                    b"ERROR" => in_error = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_id || in_error => {
                    let text = e.unescape().unwrap_or_default().to_string();
                    if in_error {
                        return Err(SourceError::InvalidQuery(text));
                    }
                    pmids.push(text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(SourceError::Parse(format!("XML parse error: {}", e))),
                _ => {}
            }
            buf.clear();
        }

        Ok(pmids)
    }
}

/// Build the PubMed search term for an author within a creation-date window.
///
/// `(("2020/01/01"[Date - Create] : "2024/12/31"[Date - Create])) AND (Yates, John 3rd[Author])`
pub fn build_query(author: &str, range: &DateRange) -> String {
    format!(
        r#"(("{}"[Date - Create] : "{}"[Date - Create])) AND ({}[Author])"#,
        range.start().format("%Y/%m/%d"),
        range.end().format("%Y/%m/%d"),
        author.trim()
    )
}

/// Fields collected while walking one `PubmedArticle` element
#[derive(Default)]
struct ArticleBuilder {
    pmid: String,
    title: String,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    medline_date: Option<String>,
    authors: Vec<ArticleAuthor>,
}

impl ArticleBuilder {
    fn accept_text(
        &mut self,
        path: &[String],
        raw: &str,
        author: Option<&mut ArticleAuthor>,
        affiliation: &mut String,
    ) {
        let Some(element) = path.last().map(String::as_str) else {
            return;
        };
        let parent = path.len().checked_sub(2).map(|i| path[i].as_str());
        let within = |name: &str| path.iter().any(|p| p == name);

        if within("ArticleTitle") {
            self.title.push_str(raw);
            return;
        }

        if within("AffiliationInfo") && within("Affiliation") {
            affiliation.push_str(raw);
            return;
        }

        let text = raw.trim().to_string();
        if text.is_empty() {
            return;
        }

        if let Some(author) = author {
            match element {
                "LastName" => author.last_name = Some(text),
                "ForeName" => author.fore_name = Some(text),
                "Initials" => author.initials = Some(text),
                _ => {}
            }
            return;
        }

        match (element, parent) {
            ("PMID", Some("MedlineCitation")) if self.pmid.is_empty() => self.pmid = text,
            ("Year", Some("PubDate")) if within("JournalIssue") => self.year = text.parse().ok(),
            ("Month", Some("PubDate")) if within("JournalIssue") => self.month = parse_month(&text),
            ("Day", Some("PubDate")) if within("JournalIssue") => self.day = text.parse().ok(),
            ("MedlineDate", Some("PubDate")) if within("JournalIssue") => {
                self.medline_date = Some(text)
            }
            _ => {}
        }
    }

    fn publication_date(&self) -> Option<PubDate> {
        match (self.year, self.month, self.day) {
            (Some(year), Some(month), Some(day)) => PubDate::from_ymd(year, month, day)
                .or_else(|| PubDate::from_year_month(year, month)),
            (Some(year), Some(month), None) => PubDate::from_year_month(year, month),
            (Some(year), None, _) => PubDate::from_year(year),
            (None, _, _) => self.medline_date.as_deref().and_then(parse_medline_date),
        }
    }

    fn build(self) -> Option<Article> {
        let publication_date = self.publication_date()?;
        let title = squeeze(&self.title);

        Some(Article {
            pmid: self.pmid,
            title: if title.is_empty() { None } else { Some(title) },
            publication_date,
            authors: self.authors,
        })
    }
}

/// Collapse whitespace runs left by XML indentation and trim the ends
fn squeeze(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Month as a number (`"03"`) or English name/abbreviation (`"Mar"`)
fn parse_month(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Ok(n) = text.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }

    let prefix: String = text.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

/// Free-text `MedlineDate` such as `"2021 Jan-Feb"` or `"1998 Dec-1999 Jan"`
fn parse_medline_date(text: &str) -> Option<PubDate> {
    let mut tokens = text.split(|c: char| c.is_whitespace() || c == '-');
    let year: i32 = tokens.next()?.parse().ok()?;

    match tokens.next().and_then(parse_month) {
        Some(month) => PubDate::from_year_month(year, month),
        None => PubDate::from_year(year),
    }
}

/// Resolve E-utilities endpoint `name` (e.g. `esearch.fcgi`) under `base_url`
pub fn endpoint_url(base_url: &str, name: &str) -> Result<Url, SourceError> {
    let invalid = |e: url::ParseError| SourceError::InvalidEndpoint {
        url: base_url.to_string(),
        message: e.to_string(),
    };
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(invalid)?;
    base.join(name).map_err(invalid)
}

/// Client for NCBI E-utilities
///
/// Performs one esearch and one efetch per query.
#[cfg(feature = "native")]
pub struct PubMedClient {
    http: HttpClient,
    esearch: Url,
    efetch: Url,
    tool: String,
    email: Option<String>,
    api_key: Option<String>,
}

#[cfg(feature = "native")]
impl PubMedClient {
    pub fn new(config: &PubMedConfig) -> Result<Self, SourceError> {
        let http = HttpClient::new(
            &format!("affil/{}", env!("CARGO_PKG_VERSION")),
            std::time::Duration::from_secs(config.timeout_secs),
        )?;

        Ok(Self {
            http,
            esearch: endpoint_url(&config.base_url, "esearch.fcgi")?,
            efetch: endpoint_url(&config.base_url, "efetch.fcgi")?,
            tool: config.tool.clone(),
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn common_params(&self) -> Vec<(&str, &str)> {
        let mut params = vec![("db", "pubmed"), ("tool", self.tool.as_str())];
        if let Some(email) = &self.email {
            params.push(("email", email.as_str()));
        }
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }
        params
    }

    /// PMIDs matching `query`, at most `max_results`
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<String>, SourceError> {
        let retmax = max_results.to_string();
        let mut params = self.common_params();
        params.push(("term", query));
        params.push(("retmax", retmax.as_str()));

        let body = self.http.get(&self.esearch, &params).await?;
        let pmids = PubMedSource::parse_esearch_response(&body)?;

        tracing::info!(count = pmids.len(), "PubMed search returned PMIDs");
        Ok(pmids)
    }

    /// Full records for the given PMIDs
    pub async fn fetch(&self, pmids: &[String]) -> Result<Vec<Article>, SourceError> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = pmids.join(",");
        let mut params = self.common_params();
        params.push(("id", ids.as_str()));
        params.push(("retmode", "xml"));

        let body = self.http.post_form(&self.efetch, &params).await?;
        let articles = PubMedSource::parse_efetch_response(&body)?;

        tracing::info!(count = articles.len(), "Fetched PubMed articles");
        Ok(articles)
    }

    /// Search then fetch
    pub async fn query(&self, query: &str, max_results: u32) -> Result<Vec<Article>, SourceError> {
        let pmids = self.search(query, max_results).await?;
        self.fetch(&pmids).await
    }
}

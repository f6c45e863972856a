//! HTTP access to the CSSE COVID-19 time-series feeds.
//!
//! Data source: the COVID-19 Data Repository by the Center for Systems
//! Science and Engineering (CSSE) at Johns Hopkins University
//! (<https://github.com/CSSEGISandData/COVID-19>).
//!
//! Each feed is one wide CSV: identifying columns followed by one column per
//! date, values are cumulative counts per county. There is no auth and no
//! pagination; a fetch downloads the full history every time.

use reqwest::blocking::Client;

use crate::data::table::CaseTable;
use crate::domain::DataKind;
use crate::error::PlotError;

const CONFIRMED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_US.csv";
const DEATHS_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_US.csv";

/// Feed URL for a data kind.
pub fn feed_url(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Cases => CONFIRMED_URL,
        DataKind::Deaths => DEATHS_URL,
    }
}

/// Blocking downloader for the CSSE feeds.
pub struct CsseClient {
    client: Client,
}

impl CsseClient {
    pub fn new() -> CsseClient {
        CsseClient {
            client: Client::new(),
        }
    }

    /// Download and parse the full wide CSV for `kind`.
    ///
    /// The fetch blocks the caller; there is no retry, no caching, and no
    /// timeout beyond the client default.
    pub fn fetch_table(&self, kind: DataKind) -> Result<CaseTable, PlotError> {
        let url = feed_url(kind);
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| PlotError::fetch(format!("request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(PlotError::fetch(format!(
                "{url} returned status {}",
                resp.status()
            )));
        }

        CaseTable::from_reader(resp)
    }
}

impl Default for CsseClient {
    fn default() -> Self {
        CsseClient::new()
    }
}

//! Lazy, page-at-a-time listing of hosted zones.

use super::api::HostedZoneApi;
use super::error::{ZoneError, ZoneResult};
use super::types::{ZonePage, ZoneSummary};
use futures::stream::{self, Stream, TryStreamExt};

/// Where the next `ListHostedZones` call starts
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Restartable view over every hosted zone in the account.
///
/// Nothing is fetched until the returned stream is polled, and each call to
/// [`pages`](Self::pages) or [`zones`](Self::zones) starts again from the
/// first page. Dropping the stream early stops paging.
#[derive(Clone, Copy)]
pub struct ZoneListing<'a> {
    api: &'a dyn HostedZoneApi,
}

impl<'a> ZoneListing<'a> {
    pub fn new(api: &'a dyn HostedZoneApi) -> Self {
        Self { api }
    }

    /// Stream of raw pages in provider order
    pub fn pages(&self) -> impl Stream<Item = ZoneResult<ZonePage>> + 'a {
        let api = self.api;
        stream::try_unfold(Cursor::Start, move |cursor| async move {
            let marker = match cursor {
                Cursor::Start => None,
                Cursor::Next(marker) => Some(marker),
                Cursor::Done => return Ok(None),
            };

            tracing::debug!(marker = ?marker, "Listing hosted zones");
            let page = api.list_hosted_zones(marker).await?;
            let next = match &page.next_marker {
                Some(marker) => Cursor::Next(marker.clone()),
                None => Cursor::Done,
            };
            Ok::<_, ZoneError>(Some((page, next)))
        })
    }

    /// Stream of individual zones, flattened across pages
    pub fn zones(&self) -> impl Stream<Item = ZoneResult<ZoneSummary>> + 'a {
        self.pages()
            .map_ok(|page| stream::iter(page.zones.into_iter().map(Ok::<_, ZoneError>)))
            .try_flatten()
    }
}

use url::Url;

use super::error::MetainfoError;
use super::torrent::Metainfo;
use crate::constants::ANNOUNCE_SCHEMES;

impl Metainfo {
    /// Interprets the announce string as an HTTP(S) tracker URL.
    ///
    /// Validation keeps the announce value as raw bytes; this is the place
    /// where it is parsed.
    ///
    /// # Errors
    ///
    /// [`MetainfoError::InvalidAnnounceUrl`] if the string is not UTF-8 or not
    /// a URL, and [`MetainfoError::UnsupportedAnnounceScheme`] for schemes
    /// other than `http` and `https`.
    ///
    /// # Examples
    ///
    /// ```
    /// use btmeta::bencode::{encode, Value};
    /// use btmeta::metainfo::Metainfo;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut doc = Value::new_dict();
    /// doc.insert("announce", "http://tracker.test:6969/announce")?;
    /// let info = doc.entry("info")?;
    /// info.insert("name", "a")?;
    /// info.insert("piece length", 16i64)?;
    /// info.insert("length", 16i64)?;
    /// info.insert("pieces", vec![0u8; 20])?;
    ///
    /// let metainfo = Metainfo::from_bytes(&encode(&doc)?)?;
    /// let url = metainfo.tracker_url()?;
    /// assert_eq!(url.host_str(), Some("tracker.test"));
    /// assert_eq!(url.port(), Some(6969));
    /// # Ok(())
    /// # }
    /// ```
    pub fn tracker_url(&self) -> Result<Url, MetainfoError> {
        let raw = self.announce_str().ok_or_else(|| {
            MetainfoError::InvalidAnnounceUrl(String::from_utf8_lossy(self.announce()).into_owned())
        })?;

        let url = Url::parse(raw).map_err(|e| MetainfoError::InvalidAnnounceUrl(e.to_string()))?;

        if !ANNOUNCE_SCHEMES.contains(&url.scheme()) {
            return Err(MetainfoError::UnsupportedAnnounceScheme(
                url.scheme().to_string(),
            ));
        }

        Ok(url)
    }
}

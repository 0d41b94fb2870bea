#[cfg(test)]
pub mod test {
    use crate::coerce::FormValue;
    use crate::document::ConfigDocument;
    use crate::schema::Key;

    /// Every key with its default as a form would show it: optional paths blank.
    pub fn all_defaults_form() -> Vec<(Key, FormValue)> {
        Key::ALL
            .into_iter()
            .map(|key| {
                let value = match key.default_value() {
                    Some(crate::types::Value::Boolean(b)) => FormValue::Flag(b),
                    Some(v) => FormValue::Text(v.to_string()),
                    None => FormValue::Text(String::new()),
                };
                (key, value)
            })
            .collect()
    }

    /// A document with every key set to a non-default value.
    pub fn sample_document() -> ConfigDocument {
        ConfigDocument::replace_all([
            (Key::LogLevel, FormValue::from("DEBUG")),
            (Key::Port, "4600".into()),
            (Key::Address, "127.0.0.1".into()),
            (Key::DataFolder, "/var/lib/navidrome".into()),
            (Key::MusicFolder, "/srv/music/\"Various Artists\"".into()),
            (Key::FfmpegPath, r"C:\ffmpeg\bin\ffmpeg.exe".into()),
            (Key::ScanSchedule, "@every 6h".into()),
            (Key::AutoScan, false.into()),
            (Key::ScanAtStartup, false.into()),
            (Key::TranscodingCacheSize, "1GiB".into()),
            (Key::EnableTranscoding, false.into()),
            (Key::TranscodingFormat, "opus".into()),
            (Key::EnableWebInterface, false.into()),
            (Key::Theme, "dark".into()),
            (Key::EnableDownloads, false.into()),
            (Key::EnableAuthentication, false.into()),
            (Key::SessionTimeout, "72".into()),
            (Key::EnableRegistration, true.into()),
            (Key::DbPath, "/var/lib/navidrome/navidrome.db".into()),
            (Key::LogFile, "/var/log/navidrome.log".into()),
            (Key::VerboseLogging, true.into()),
        ])
        .expect("sample values are well-typed")
    }

    #[test]
    fn sample_sets_every_key() {
        let doc = sample_document();
        assert_eq!(doc.len(), Key::ALL.len());
        for key in Key::ALL {
            assert_ne!(doc.get(key), key.default_value(), "{key}");
        }
    }

    #[test]
    fn defaults_form_covers_every_key() {
        assert_eq!(all_defaults_form().len(), Key::ALL.len());
    }
}

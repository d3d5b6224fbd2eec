// Render module: the public map page.

use crate::config::AppConfig;
use crate::model::{FinalizedRecord, RenderError};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct MapSettings {
    pub center: [f64; 2],
    pub zoom: u8,
}

impl From<&AppConfig> for MapSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            center: config.map_center,
            zoom: config.map_zoom,
        }
    }
}

#[derive(Serialize)]
struct Marker {
    lat: f64,
    lon: f64,
    tooltip: String,
    popup: String,
}

impl From<&FinalizedRecord> for Marker {
    fn from(record: &FinalizedRecord) -> Self {
        Self {
            lat: record.latitude,
            lon: record.longitude,
            tooltip: html_escape(&record.name),
            popup: format!(
                "<b>{}</b><br>{}<br><hr style='margin:4px'>{}",
                html_escape(&record.name),
                html_escape(&record.address_text),
                html_escape(&record.snippet)
            ),
        }
    }
}

/// Builds a standalone Leaflet page with one marker per record.
pub fn render_map(records: &[FinalizedRecord], settings: &MapSettings) -> Result<String, RenderError> {
    let markers: Vec<Marker> = records.iter().map(Marker::from).collect();
    // "</" would end the script element early.
    let markers_json = serde_json::to_string(&markers)?.replace("</", "<\\/");
    let [lat, lon] = settings.center;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Sietsemap</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>
const map = L.map('map').setView([{lat}, {lon}], {zoom});
L.tileLayer('https://{{s}}.basemaps.cartocdn.com/light_all/{{z}}/{{x}}/{{y}}{{r}}.png', {{
    attribution: '&copy; OpenStreetMap contributors &copy; CARTO',
    maxZoom: 19,
}}).addTo(map);

const markers = {markers_json};
markers.forEach(m => {{
    L.circleMarker([m.lat, m.lon], {{
        radius: 7, fillColor: '#00008b', color: '#fff', weight: 2, fillOpacity: 0.85
    }})
        .bindPopup(m.popup)
        .bindTooltip(m.tooltip)
        .addTo(map);
}});
</script>
</body>
</html>
"#,
        zoom = settings.zoom,
    ))
}

/// Renders the map and writes it to `path`, creating parent directories.
pub fn write_map(records: &[FinalizedRecord], settings: &MapSettings, path: &Path) -> Result<(), RenderError> {
    let html = render_map(records, settings)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MapSettings {
        MapSettings::from(&AppConfig::default())
    }

    fn record(name: &str, snippet: &str) -> FinalizedRecord {
        FinalizedRecord {
            name: name.into(),
            address_text: "123 Smith St, Brooklyn, NY 11231".into(),
            snippet: snippet.into(),
            latitude: 40.68,
            longitude: -73.99,
            date_added: "2024-05-01".into(),
        }
    }

    #[test]
    fn centers_on_configured_view() {
        let html = render_map(&[], &settings()).unwrap();
        assert!(html.contains("setView([40.73, -73.94], 11)"));
        assert!(html.contains("const markers = [];"));
    }

    #[test]
    fn markers_are_escaped() {
        let html = render_map(
            &[record("Lucia's <Trattoria>", "</script><script>alert(1)</script>")],
            &settings(),
        )
        .unwrap();
        assert!(html.contains("Lucia&#39;s &lt;Trattoria&gt;"));
        assert!(!html.contains("</script><script>alert"));
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains("\"lat\":40.68"));
    }

    #[test]
    fn write_map_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("index.html");
        write_map(&[record("Lucia's", "pasta")], &settings(), &path).unwrap();
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}

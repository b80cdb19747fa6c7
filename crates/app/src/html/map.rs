pub const MAP_INDEX_HTML: &str = r##"
<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Ground Station Map</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>
  <!-- leaflet-rotatedmarker 0.2.0 -->
  <script src="https://unpkg.com/leaflet-rotatedmarker@0.2.0/leaflet.rotatedMarker.js"></script>

  <style>
    html, body { height: 100%; margin: 0; background: #050b16; color: #e2e8f0; font-family: ui-sans-serif, system-ui; }
    #map { position: absolute; inset: 0; }
    #status {
      position: absolute; z-index: 1000; left: 12px; bottom: 12px;
      padding: 6px 10px; border-radius: 6px; background: rgba(10, 22, 40, 0.85); font-size: 13px;
    }
    .leaflet-popup-content-wrapper { background: #0a1628; color: #e2e8f0; }
    .leaflet-popup-tip { background: #0a1628; }
  </style>
</head>

<body>
  <div id="map"></div>
  <div id="status">Connecting…</div>

  <script>
    const POLL_MS = 2000;
    const statusEl = document.getElementById('status');
    const layers = new Map();
    let map = null;

    function iconFor(icon) {
      return L.icon({ iconUrl: icon.url, iconSize: icon.size, iconAnchor: icon.anchor });
    }

    function initMap(snapshot) {
      const view = snapshot.view;
      map = L.map(view.container, { center: [view.center.lat, view.center.lon], zoom: view.zoom });
      for (const tiles of snapshot.tiles) {
        L.tileLayer(tiles.url_template, { maxZoom: tiles.max_zoom }).addTo(map);
      }
    }

    function reconcile(markers) {
      const seen = new Set();
      for (const entry of markers) {
        seen.add(entry.id);
        const latlng = [entry.location.lat, entry.location.lon];
        let layer = layers.get(entry.id);
        if (!layer) {
          layer = L.marker(latlng, {
            icon: iconFor(entry.icon),
            rotationAngle: entry.rotation,
            rotationOrigin: 'center',
          }).addTo(map);
          layers.set(entry.id, layer);
        } else {
          layer.setLatLng(latlng);
          if (layer.setRotationAngle) layer.setRotationAngle(entry.rotation);
        }
        if (entry.popup !== null) {
          const popup = layer.getPopup();
          if (!popup) layer.bindPopup(entry.popup);
          else if (popup.getContent() !== entry.popup) popup.setContent(entry.popup);
        }
      }
      for (const [id, layer] of layers) {
        if (!seen.has(id)) {
          map.removeLayer(layer);
          layers.delete(id);
        }
      }
    }

    async function poll() {
      try {
        const response = await fetch('/overlay', { cache: 'no-store' });
        if (!response.ok) throw new Error('HTTP ' + response.status);
        const snapshot = await response.json();
        if (!map) initMap(snapshot);
        reconcile(snapshot.markers);
        const boat = snapshot.boat;
        statusEl.textContent = 'Boat ' + boat.location.lat.toFixed(5) + ', ' +
          boat.location.lon.toFixed(5) + ' · heading ' + boat.heading + '°';
      } catch (err) {
        statusEl.textContent = 'Overlay unavailable: ' + err.message;
      } finally {
        setTimeout(poll, POLL_MS);
      }
    }

    poll();
  </script>
</body>

</html>
"##;

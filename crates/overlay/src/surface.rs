//! The mapping-widget boundary and its in-process implementation.
//!
//! [`MapSurface`] is the capability set the controller needs from a map:
//! place, move, label, enumerate and remove markers. [`MemorySurface`] keeps
//! that state in memory and is what the HTTP server snapshots for the browser
//! page, which does the actual tile and marker rendering.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::OverlayError,
    geo::LatLon,
    marker::{Marker, MarkerId},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Initial camera of a map bound to a named page container.
pub struct MapView {
    pub container: String,
    pub center: LatLon,
    pub zoom: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Slippy-map tile source, `{s}`/`{z}`/`{x}`/`{y}` placeholders included.
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            max_zoom: 18,
        }
    }
}

pub trait MapSurface {
    /// Create a surface bound to `view.container`.
    fn open(view: MapView) -> Self
    where
        Self: Sized;

    fn add_tile_layer(&mut self, layer: TileLayer);

    fn add_marker(&mut self, marker: Marker) -> MarkerId;

    /// Move a marker and set its icon rotation in one step.
    fn set_position(
        &mut self,
        id: MarkerId,
        location: LatLon,
        rotation: f64,
    ) -> Result<(), OverlayError>;

    /// Attach a popup, replacing any previous text.
    fn bind_popup(&mut self, id: MarkerId, text: String) -> Result<(), OverlayError>;

    fn marker(&self, id: MarkerId) -> Option<&Marker>;

    /// Every marker currently on the surface, in placement order.
    fn markers(&self) -> Vec<(MarkerId, &Marker)>;

    fn remove_marker(&mut self, id: MarkerId) -> Option<Marker>;
}

#[derive(Debug)]
pub struct MemorySurface {
    view: MapView,
    tile_layers: Vec<TileLayer>,
    markers: BTreeMap<MarkerId, Marker>,
    next_id: u64,
}

#[derive(Serialize)]
pub struct MarkerEntry<'a> {
    pub id: MarkerId,
    #[serde(flatten)]
    pub marker: &'a Marker,
}

#[derive(Serialize)]
/// Borrowed JSON view of a [`MemorySurface`].
pub struct SurfaceSnapshot<'a> {
    pub view: &'a MapView,
    pub tiles: &'a [TileLayer],
    pub markers: Vec<MarkerEntry<'a>>,
}

impl MemorySurface {
    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tile_layers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn snapshot(&self) -> SurfaceSnapshot<'_> {
        SurfaceSnapshot {
            view: &self.view,
            tiles: &self.tile_layers,
            markers: self
                .markers
                .iter()
                .map(|(id, marker)| MarkerEntry { id: *id, marker })
                .collect(),
        }
    }
}

impl MapSurface for MemorySurface {
    fn open(view: MapView) -> Self {
        Self {
            view,
            tile_layers: Vec::new(),
            markers: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn add_tile_layer(&mut self, layer: TileLayer) {
        self.tile_layers.push(layer);
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(id, marker);
        id
    }

    fn set_position(
        &mut self,
        id: MarkerId,
        location: LatLon,
        rotation: f64,
    ) -> Result<(), OverlayError> {
        let marker = self
            .markers
            .get_mut(&id)
            .ok_or(OverlayError::UnknownMarker(id))?;
        marker.location = location;
        marker.rotation = rotation;
        Ok(())
    }

    fn bind_popup(&mut self, id: MarkerId, text: String) -> Result<(), OverlayError> {
        let marker = self
            .markers
            .get_mut(&id)
            .ok_or(OverlayError::UnknownMarker(id))?;
        marker.popup = Some(text);
        Ok(())
    }

    fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    fn markers(&self) -> Vec<(MarkerId, &Marker)> {
        self.markers.iter().map(|(id, marker)| (*id, marker)).collect()
    }

    fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        self.markers.remove(&id)
    }
}

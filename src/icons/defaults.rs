//! Default icon set compiled into the binary.

use super::sizes::IconSize;

static DEFAULT_ICONS: [(u32, &[u8]); 8] = [
  (512, include_bytes!("../../assets/default-icons/icon-512x512.png")),
  (384, include_bytes!("../../assets/default-icons/icon-384x384.png")),
  (192, include_bytes!("../../assets/default-icons/icon-192x192.png")),
  (152, include_bytes!("../../assets/default-icons/icon-152x152.png")),
  (144, include_bytes!("../../assets/default-icons/icon-144x144.png")),
  (128, include_bytes!("../../assets/default-icons/icon-128x128.png")),
  (96, include_bytes!("../../assets/default-icons/icon-96x96.png")),
  (72, include_bytes!("../../assets/default-icons/icon-72x72.png")),
];

/// Bytes of the bundled icon for `size`, if the default set has one.
pub fn default_icon(size: IconSize) -> Option<&'static [u8]> {
  DEFAULT_ICONS
    .iter()
    .find(|(edge, _)| *edge == size.edge())
    .map(|(_, bytes)| *bytes)
}

/// Data side of the layers: split listings, sampling order and image
/// preprocessing.
///
/// Architecture:
/// ```text
///   {split}.txt
///        │
///        ▼
///   ┌──────────┐
///   │  index    │  listing → SplitIndex (ordered ids)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ sampler   │  sequential wrap | seeded uniform pick → position
///   └──────────┘
///        │ id
///        ▼
///   ┌────────────┐
///   │ preprocess │  png → 3xHxW BGR - mean,  png → 1xHxW importance
///   └────────────┘
///        │
///        ▼
///     Sample
/// ```

pub mod index;
pub mod model;
pub mod preprocess;
pub mod sampler;

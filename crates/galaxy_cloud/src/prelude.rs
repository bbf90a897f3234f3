pub use crate::{
    generate, generate_nebulae, generate_starfield, AxialSpin, CloudError, GalaxyParameters,
    NebulaParameters, PointCloud, StarfieldParameters,
};

use crate::prelude::{PipelineError, PipelineResult};

pub const DEFAULT_NX: u32 = 1440;
pub const DEFAULT_NY: u32 = 720;
pub const DEFAULT_DZ: f64 = 25.0;

/// Longitude/latitude/depth discretisation shared by every block lookup in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    nx: u32,
    ny: u32,
    dz: f64,
}

impl GridSpec {
    /// `nx` segments over 360 degrees of longitude, `ny` over 180 degrees of
    /// latitude, `dz` metres per depth segment.
    pub fn new(nx: u32, ny: u32, dz: f64) -> PipelineResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(PipelineError::InvalidGrid(format!(
                "segment counts must be positive (nx={}, ny={})",
                nx, ny
            )));
        }
        if !dz.is_finite() || dz <= 0.0 {
            return Err(PipelineError::InvalidGrid(format!(
                "depth segment must be positive, got {}",
                dz
            )));
        }
        Ok(Self { nx, ny, dz })
    }

    pub fn nx(&self) -> u32 {
        self.nx
    }

    pub fn ny(&self) -> u32 {
        self.ny
    }

    pub fn dz(&self) -> f64 {
        self.dz
    }

    pub fn dx(&self) -> f64 {
        360.0 / self.nx as f64
    }

    pub fn dy(&self) -> f64 {
        180.0 / self.ny as f64
    }

    /// Flattened block id for a point; depth in metres.
    ///
    /// Non-positive longitudes are shifted by 360 and latitude becomes
    /// colatitude before binning. Cell indices round half to even. Points
    /// outside the grid are not rejected: deep points map to large ids and
    /// points above sea level to negative ones.
    pub fn block_id(&self, lat: f64, lon: f64, depth: f64) -> i64 {
        let x = if lon > 0.0 { lon } else { lon + 360.0 };
        let y = 90.0 - lat;

        let i = (x / self.dx()).round_ties_even() as i64 + 1;
        let j = (y / self.dy()).round_ties_even() as i64 + 1;
        let k = (depth / self.dz).round_ties_even() as i64 + 1;

        let nx = self.nx as i64;
        let ny = self.ny as i64;
        (k - 1) * nx * ny + (j - 1) * nx + i
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            nx: DEFAULT_NX,
            ny: DEFAULT_NY,
            dz: DEFAULT_DZ,
        }
    }
}

/// Free-function form of [`GridSpec::block_id`].
pub fn block_id(lat: f64, lon: f64, depth: f64, grid: &GridSpec) -> i64 {
    grid.block_id(lat, lon, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_point_maps_to_reference_block() {
        let grid = GridSpec::default();
        assert_eq!(grid.block_id(0.0, 0.0, 0.0), 519_841);
        assert_eq!(block_id(0.0, 0.0, 0.0, &grid), 519_841);
    }

    #[test]
    fn block_id_is_deterministic() {
        let grid = GridSpec::new(1440, 720, 25.0).unwrap();
        let first = grid.block_id(-31.95, 115.86, 12_500.0);
        for _ in 0..10 {
            assert_eq!(grid.block_id(-31.95, 115.86, 12_500.0), first);
        }
    }

    #[test]
    fn antimeridian_longitudes_normalise_before_binning() {
        let grid = GridSpec::new(360, 180, 1000.0).unwrap();
        // -179.99 -> 180.01 -> i = 181; 180.0 stays -> i = 181
        assert_eq!(grid.block_id(0.0, -179.99, 0.0), 90 * 360 + 181);
        assert_eq!(grid.block_id(0.0, 180.0, 0.0), 90 * 360 + 181);
    }

    #[test]
    fn non_positive_longitudes_wrap_before_binning() {
        // dx = 90, top row: id == i
        let grid = GridSpec::new(4, 2, 10.0).unwrap();
        assert_eq!(grid.block_id(90.0, -180.0, 0.0), 3);
        assert_eq!(grid.block_id(90.0, -90.0, 0.0), 4);
        assert_eq!(grid.block_id(90.0, -0.001, 0.0), 5);
        assert_eq!(grid.block_id(90.0, 0.0, 0.0), 5);
        assert_eq!(grid.block_id(90.0, 90.0, 0.0), 2);
    }

    #[test]
    fn rounding_is_half_to_even() {
        // dx = 1.0: 2.5 -> 2, 3.5 -> 4
        let grid = GridSpec::new(360, 180, 1.0).unwrap();
        assert_eq!(grid.block_id(90.0, 2.5, 0.0), 3);
        assert_eq!(grid.block_id(90.0, 3.5, 0.0), 5);
        // depth 0.5 rounds to layer 0, 1.5 to layer 2
        assert_eq!(grid.block_id(90.0, 1.0, 0.5), 2);
        assert_eq!(grid.block_id(90.0, 1.0, 1.5), 2 * 360 * 180 + 2);
    }

    #[test]
    fn deep_points_are_not_rejected() {
        let grid = GridSpec::default();
        let shallow = grid.block_id(10.0, 10.0, 0.0);
        let deep = grid.block_id(10.0, 10.0, 1.0e7);
        assert!(deep > shallow);
    }

    #[test]
    fn points_above_sea_level_get_negative_ids() {
        let grid = GridSpec::default();
        // k = -40 + 1 = -39, j = 361, i = 41
        let id = grid.block_id(0.0, 10.0, -1000.0);
        assert_eq!(id, -40 * 1440 * 720 + 360 * 1440 + 41);
        assert_eq!(id, -40_953_559);
        assert!(id < grid.block_id(0.0, 10.0, 0.0));
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(GridSpec::new(0, 720, 25.0).is_err());
        assert!(GridSpec::new(1440, 0, 25.0).is_err());
        assert!(GridSpec::new(1440, 720, 0.0).is_err());
        assert!(GridSpec::new(1440, 720, f64::NAN).is_err());
    }
}

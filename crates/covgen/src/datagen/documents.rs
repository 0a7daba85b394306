use cov_config::Catalogs;
use cov_config::catalogs::{MAIN_AREAS, PLACEMENTS, PRODUCTS, SUB_AREAS};
use cov_core::{SampleError, SampleResult, WeightedCatalog, pick_one, pick_one_uniform};
use orion_error::StructError;
use orion_error::compat_prelude::*;
use orion_error::prelude::*;
use rand::Rng;
use serde::Serialize;

use super::users::Population;
use crate::error::{GenReason, GenResult};

/// Users attached to each updated document.
const USERS_PER_DOCUMENT: usize = 3;

/// Partial document body for a bulk `update` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentUpdate {
    pub mainarea: String,
    pub subarea: String,
    pub product: String,
    pub placement: String,
    pub users: Vec<String>,
}

/// Assigns classification attributes and users to existing documents.
#[derive(Debug)]
pub struct DocumentUpdateFactory<'a> {
    main_areas: &'a WeightedCatalog,
    sub_areas: &'a WeightedCatalog,
    products: &'a WeightedCatalog,
    placements: &'a WeightedCatalog,
    population: &'a Population,
}

impl<'a> DocumentUpdateFactory<'a> {
    /// Needs the `main_areas`, `sub_areas`, `products` and `placements`
    /// catalogs plus a non-empty population.
    pub fn new(catalogs: &'a Catalogs, population: &'a Population) -> GenResult<Self> {
        if population.is_empty() {
            return Err(StructError::from(GenReason::Sample(SampleError::EmptyInput(
                "user population is empty".into(),
            ))));
        }
        Ok(Self {
            main_areas: catalogs.require(MAIN_AREAS).owe_conf()?,
            sub_areas: catalogs.require(SUB_AREAS).owe_conf()?,
            products: catalogs.require(PRODUCTS).owe_conf()?,
            placements: catalogs.require(PLACEMENTS).owe_conf()?,
            population,
        })
    }

    pub fn create<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleResult<DocumentUpdate> {
        let mainarea = pick_one(self.main_areas, rng)?.to_string();
        let subarea = pick_one(self.sub_areas, rng)?.to_string();
        let product = pick_one(self.products, rng)?.to_string();
        let placement = pick_one(self.placements, rng)?.to_string();
        let users = (0..USERS_PER_DOCUMENT)
            .map(|_| pick_one_uniform(self.population.users(), rng).map(|u| u.username.clone()))
            .collect::<SampleResult<Vec<_>>>()?;
        Ok(DocumentUpdate {
            mainarea,
            subarea,
            product,
            placement,
            users,
        })
    }
}

use crate::types::Material;

/// Named material catalogue consulted by material lookups.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materials used by muonium target and detector setups.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (name, density) in [
            ("Galactic", 1.0e-25),
            ("Vacuum", 1.0e-25),
            ("G4_AIR", 1.20479e-3),
            ("G4_Galactic", 1.0e-25),
            ("LiqHe", 0.125),
            ("GasHe", 1.66e-4),
            ("SFHe", 0.145),
            ("G4_Si", 2.33),
            ("G4_SILICON_DIOXIDE", 2.32),
            ("Aerogel", 0.03),
            ("G4_Cu", 8.96),
            ("G4_Al", 2.699),
            ("G4_Fe", 7.874),
            ("G4_Pb", 11.35),
            ("G4_W", 19.3),
            ("G4_Be", 1.848),
            ("G4_KAPTON", 1.42),
            ("G4_MYLAR", 1.4),
            ("G4_PLASTIC_SC_VINYLTOLUENE", 1.032),
            ("G4_STAINLESS-STEEL", 8.0),
        ] {
            table.insert(name, density);
        }
        table
    }

    /// Add a material. An existing entry with the same name is replaced.
    pub fn insert(&mut self, name: impl Into<String>, density: f64) {
        let name = name.into();
        match self.materials.iter_mut().find(|m| m.name == name) {
            Some(existing) => existing.density = density,
            None => self.materials.push(Material { name, density }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

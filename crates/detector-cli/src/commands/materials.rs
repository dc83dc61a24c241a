//! Materials command

use geometry_kernel::MaterialTable;

pub fn run() {
    let table = MaterialTable::standard();
    println!("Available materials ({}):", table.len());
    println!();
    for material in table.iter() {
        println!("  {:<28} {:>10.4e} g/cm3", material.name, material.density);
    }
}

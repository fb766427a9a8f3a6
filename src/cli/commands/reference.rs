//! Reference list command handler

use crate::cli::ReferenceList;
use crate::constants::{nationalities, visit_reasons};

pub fn cmd_reference(list: ReferenceList) {
    match list {
        ReferenceList::Nationalities => print_names(nationalities::ALL),
        ReferenceList::QuickNationalities => print_names(nationalities::QUICK_ACCESS),
        ReferenceList::ExportOrder => print_names(nationalities::EXPORT_ORDER),
        ReferenceList::Reasons => print_names(visit_reasons::SUGGESTED),
        ReferenceList::CountryCodes => {
            for (name, code) in nationalities::COUNTRY_CODES {
                println!("{code}  {name}");
            }
        }
    }
}

fn print_names(names: &[&str]) {
    for name in names {
        println!("{name}");
    }
}

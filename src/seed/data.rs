use crate::model::{HorseCreate, Id, OwnerCreate, Sex};
use crate::store::traits::Backend;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;

/// One seeded horse; parents refer to earlier rows by position.
struct SeedHorse {
    name: &'static str,
    description: Option<&'static str>,
    born: (i32, u32, u32),
    sex: Sex,
    owner: Option<usize>,
    mother: Option<usize>,
    father: Option<usize>,
}

const OWNERS: &[(&str, &str, Option<&str>)] = &[
    ("Astrid", "Lindgren", Some("Breeds warmbloods near Uppsala")),
    ("Henrik", "Berg", None),
    ("Maja", "Holm", Some("Show jumping stable")),
];

/// Four generations, ordered so every parent precedes its offspring.
const HORSES: &[SeedHorse] = &[
    SeedHorse { name: "Wendy", description: Some("The oldest mare of the stud"), born: (1998, 4, 12), sex: Sex::Female, owner: Some(0), mother: None, father: None },
    SeedHorse { name: "Hugo", description: None, born: (1997, 5, 3), sex: Sex::Male, owner: Some(1), mother: None, father: None },
    SeedHorse { name: "Bella", description: Some("Calm and reliable"), born: (2003, 3, 21), sex: Sex::Female, owner: Some(0), mother: Some(0), father: Some(1) },
    SeedHorse { name: "Rex", description: None, born: (2002, 6, 30), sex: Sex::Male, owner: Some(2), mother: None, father: None },
    SeedHorse { name: "Luna", description: None, born: (2004, 7, 14), sex: Sex::Female, owner: Some(1), mother: Some(0), father: None },
    SeedHorse { name: "Odin", description: Some("Imported stallion"), born: (2001, 2, 8), sex: Sex::Male, owner: None, mother: None, father: None },
    SeedHorse { name: "Mia", description: None, born: (2009, 5, 1), sex: Sex::Female, owner: Some(2), mother: Some(2), father: Some(3) },
    SeedHorse { name: "Thor", description: None, born: (2010, 4, 18), sex: Sex::Male, owner: Some(1), mother: Some(4), father: Some(5) },
    SeedHorse { name: "Stella", description: Some("Promising show jumper"), born: (2016, 4, 2), sex: Sex::Female, owner: Some(2), mother: Some(6), father: Some(7) },
    SeedHorse { name: "Bella-Mia", description: None, born: (2018, 6, 9), sex: Sex::Female, owner: None, mother: Some(6), father: Some(5) },
];

pub async fn load_seed_data<S: Backend>(store: &S) -> Result<()> {
    let mut owner_ids: Vec<Id> = Vec::with_capacity(OWNERS.len());
    for (first_name, last_name, description) in OWNERS {
        let owner = store
            .create_owner(&OwnerCreate {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                description: description.map(str::to_string),
            })
            .await
            .with_context(|| format!("seeding owner {} {}", first_name, last_name))?;
        owner_ids.push(owner.id);
    }

    let mut horse_ids: Vec<Id> = Vec::with_capacity(HORSES.len());
    for seed in HORSES {
        let (y, m, d) = seed.born;
        let date_of_birth = NaiveDate::from_ymd_opt(y, m, d)
            .with_context(|| format!("invalid birth date of {}", seed.name))?;
        let horse = store
            .create_horse(&HorseCreate {
                name: seed.name.to_string(),
                description: seed.description.map(str::to_string),
                date_of_birth,
                sex: seed.sex,
                owner_id: seed.owner.map(|i| owner_ids[i]),
                mother_id: seed.mother.map(|i| horse_ids[i]),
                father_id: seed.father.map(|i| horse_ids[i]),
            })
            .await
            .with_context(|| format!("seeding horse {}", seed.name))?;
        horse_ids.push(horse.id);
    }

    info!(
        "Seed data loaded: {} owners, {} horses",
        owner_ids.len(),
        horse_ids.len()
    );
    Ok(())
}

use std::collections::BTreeSet;
use std::path::PathBuf;

use simmetis::paths::{data_file_name, packaged_data_dir};
use simmetis::{UserCommands, Value};
use tempfile::tempdir;

fn referenced_files(cmds: &UserCommands) -> BTreeSet<PathBuf> {
    let mut files = BTreeSet::new();
    for (_, value) in cmds.iter() {
        match value {
            Value::List(items) => {
                files.extend(items.iter().filter_map(data_file_name).map(PathBuf::from));
            }
            other => files.extend(data_file_name(other).map(PathBuf::from)),
        }
    }
    files
}

#[test]
fn defaults_reference_data_files() {
    let cmds = UserCommands::new().unwrap();
    let files = referenced_files(&cmds);
    assert!(files.contains(&PathBuf::from("TC_filter_L.dat")));
    assert!(files.contains(&PathBuf::from("PSF_SCAO_L.fits")));
    assert!(files.contains(&PathBuf::from("TC_sky_25.tbl")));
}

#[test]
fn all_default_paths_exist_in_populated_data_dir() {
    let dir = tempdir().unwrap();
    let mut cmds = UserCommands::new().unwrap();
    cmds.set("SIM_DATA_DIR", dir.path()).unwrap();
    assert_eq!(cmds.data_dir(), dir.path());

    for file in referenced_files(&cmds) {
        std::fs::write(dir.path().join(file), b"").unwrap();
    }

    assert!(cmds.missing_paths().is_empty());
}

#[test]
fn removed_data_file_is_reported() {
    let dir = tempdir().unwrap();
    let mut cmds = UserCommands::new().unwrap();
    cmds.set("SIM_DATA_DIR", dir.path()).unwrap();

    for file in referenced_files(&cmds) {
        std::fs::write(dir.path().join(file), b"").unwrap();
    }
    std::fs::remove_file(dir.path().join("PSF_SCAO_L.fits")).unwrap();

    let missing = cmds.missing_paths();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].key, "SCOPE_PSF_FILE");
    assert_eq!(missing[0].path, dir.path().join("PSF_SCAO_L.fits"));
}

#[test]
fn shared_file_reported_per_keyword() {
    let dir = tempdir().unwrap();
    let mut cmds = UserCommands::new().unwrap();
    cmds.set("SIM_DATA_DIR", dir.path()).unwrap();

    for file in referenced_files(&cmds) {
        std::fs::write(dir.path().join(file), b"").unwrap();
    }
    // Referenced by both OBS_FILTER_NAME and INST_FILTER_TC.
    std::fs::remove_file(dir.path().join("TC_filter_L.dat")).unwrap();

    let keys: Vec<String> = cmds.missing_paths().into_iter().map(|m| m.key).collect();
    assert_eq!(keys, vec!["OBS_FILTER_NAME", "INST_FILTER_TC"]);
}

#[test]
fn packaged_data_dir_ships_default_config() {
    assert!(packaged_data_dir()
        .join(simmetis::config::DEFAULT_CONFIG_NAME)
        .exists());
}

//! Grouping of extracted dependencies into per-file records.

use std::collections::HashMap;
use tracing::debug;

use super::Extraction;
use crate::config::ExtractConfig;
use crate::constants::{BUILD_SRC_DIR, MAVEN_DATASOURCE};
use crate::models::{DepType, PackageFile};

/// Attach every dependency to the record of the file that owns its version text.
///
/// Returns `None` when the run found no dependencies at all. Otherwise returns every
/// record, including those of files without dependencies, in the order the files were
/// first seen.
///
/// Along the way each dependency gets its top-level `file_replace_position`, a default
/// datasource, its registry URLs and a default dependency type. Dependencies without an
/// owning file or without a usable name are dropped. A dependency that repeats the name
/// and position of one already in the record is dropped too, which is how the second
/// Kotlin pass and scripts applied from several places stay duplicate-free.
pub fn merge_dependencies(extraction: Extraction, config: &ExtractConfig) -> Option<Vec<PackageFile>> {
    let Extraction {
        deps,
        mut records,
        registries,
        kotlin_file_count,
    } = extraction;

    if deps.is_empty() {
        return None;
    }

    let mut index: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .map(|(i, record)| (record.package_file.clone(), i))
        .collect();

    for mut dep in deps {
        dep.file_replace_position = dep.manager_data.file_replace_position;

        let Some(package_file) = dep.manager_data.package_file.clone() else {
            debug!(
                repository = config.run_label(),
                dep_name = dep.dep_name.as_deref(),
                "Dropping dependency without an owning file"
            );
            continue;
        };

        let slot = *index.entry(package_file.clone()).or_insert_with(|| {
            records.push(PackageFile::new(package_file.clone()));
            records.len() - 1
        });

        let datasource = dep.datasource.get_or_insert_with(|| MAVEN_DATASOURCE.to_string());
        if datasource.as_str() == MAVEN_DATASOURCE {
            match registries.registry_urls_for_dep(&dep) {
                Ok(urls) => dep.registry_urls = urls,
                Err(err) => {
                    debug!(
                        repository = config.run_label(),
                        package_file = %package_file,
                        "Dropping dependency: {err}"
                    );
                    continue;
                }
            }
            if dep.dep_type.is_none() {
                dep.dep_type = Some(if package_file.starts_with(BUILD_SRC_DIR) && kotlin_file_count == 0 {
                    DepType::DevDependencies
                } else {
                    DepType::Dependencies
                });
            }
        }

        let record = &mut records[slot];
        let duplicate = record.deps.iter().any(|known| {
            known.dep_name == dep.dep_name
                && known.manager_data.file_replace_position == dep.manager_data.file_replace_position
        });
        if !duplicate {
            record.deps.push(dep);
        }
    }

    Some(records)
}

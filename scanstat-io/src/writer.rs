//! Points-file and cluster-info-file writers, one per clustering engine.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use scanstat_core::{ClusterLabel, ClusterSummary, PointSet};

use crate::Result;

/// Appends `_Info` to a points-output path, matching the fixed naming
/// convention cluster-info files use.
#[must_use]
pub fn info_path_for(points_path: &Path) -> std::path::PathBuf {
    let mut name = points_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str("_Info");
    points_path.with_file_name(name)
}

/// Writes `x,y,clusterID` per point, one line each, in the indexed order.
pub fn write_dbscan_points<P: AsRef<Path>>(
    path: P,
    points: &PointSet,
    labels: &[ClusterLabel],
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for i in 0..points.len() {
        writeln!(writer, "{},{},{}", points.x[i], points.y[i], labels[i])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `X,Y,CaseOrCon,ClusterID` with header, one line per point.
pub fn write_bernoulli_points<P: AsRef<Path>>(
    path: P,
    points: &PointSet,
    labels: &[ClusterLabel],
) -> Result<()> {
    let class = points
        .class
        .as_ref()
        .expect("bernoulli points must be class-tagged");
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "X,Y,CaseOrCon,ClusterID")?;
    for i in 0..points.len() {
        writeln!(
            writer,
            "{},{},{},{}",
            points.x[i], points.y[i], class[i], labels[i]
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `ClusterID,nCas,nCon,LL[,PValue]`, one line per surviving cluster.
pub fn write_bernoulli_info<P: AsRef<Path>>(path: P, summaries: &[ClusterSummary]) -> Result<()> {
    let mc_ran = summaries.iter().any(|s| s.p_value.is_some());
    let mut writer = BufWriter::new(File::create(path)?);
    if mc_ran {
        writeln!(writer, "ClusterID,nCas,nCon,LL,PValue")?;
    } else {
        writeln!(writer, "ClusterID,nCas,nCon,LL")?;
    }
    for s in summaries {
        if let Some(p) = s.p_value {
            writeln!(
                writer,
                "{},{},{},{},{}",
                s.cluster_id, s.count1, s.count0, s.ll, p
            )?;
        } else {
            writeln!(writer, "{},{},{},{}", s.cluster_id, s.count1, s.count0, s.ll)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes `x,y,clusterID` for event points only, in the indexed order.
pub fn write_poisson_points<P: AsRef<Path>>(
    path: P,
    points: &PointSet,
    labels: &[ClusterLabel],
) -> Result<()> {
    let class = points
        .class
        .as_ref()
        .expect("poisson points must be class-tagged");
    let mut writer = BufWriter::new(File::create(path)?);
    for i in 0..points.len() {
        if class[i] == 1 {
            writeln!(writer, "{},{},{}", points.x[i], points.y[i], labels[i])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes `ClusterID,Events,expEvents,LL[,PValue]`, one line per surviving
/// cluster.
pub fn write_poisson_info<P: AsRef<Path>>(path: P, summaries: &[ClusterSummary]) -> Result<()> {
    let mc_ran = summaries.iter().any(|s| s.p_value.is_some());
    let mut writer = BufWriter::new(File::create(path)?);
    if mc_ran {
        writeln!(writer, "ClusterID,Events,expEvents,LL,PValue")?;
    } else {
        writeln!(writer, "ClusterID,Events,expEvents,LL")?;
    }
    for s in summaries {
        if let Some(p) = s.p_value {
            writeln!(
                writer,
                "{},{},{},{},{}",
                s.cluster_id, s.count1, s.exp_count1, s.ll, p
            )?;
        } else {
            writeln!(
                writer,
                "{},{},{},{}",
                s.cluster_id, s.count1, s.exp_count1, s.ll
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn dbscan_points_have_no_header() {
        let file = NamedTempFile::new().unwrap();
        let points = PointSet::new(vec![1.0, 2.0], vec![1.0, 2.0]);
        write_dbscan_points(file.path(), &points, &[1, -1]).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "1,1,1\n2,2,-1\n");
    }

    #[test]
    fn bernoulli_info_adds_pvalue_column_only_when_present() {
        let file = NamedTempFile::new().unwrap();
        let summaries = vec![ClusterSummary::new(1, 10, 5, 0.0, 3.2)];
        write_bernoulli_info(file.path(), &summaries).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "ClusterID,nCas,nCon,LL\n1,10,5,3.2\n");
    }

    #[test]
    fn poisson_points_skip_background() {
        let file = NamedTempFile::new().unwrap();
        let points = PointSet::with_class(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], vec![0, 1, 1]);
        write_poisson_points(file.path(), &points, &[-1, 1, 1]).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "2,2,1\n3,3,1\n");
    }

    #[test]
    fn info_path_appends_suffix() {
        let path = Path::new("/tmp/out.csv");
        assert_eq!(info_path_for(path), Path::new("/tmp/out.csv_Info"));
    }
}

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use blockface_mesh::MeshBuffers;

/// Writes `mesh` as Wavefront OBJ with per-vertex normals.
/// OBJ indices are 1-based; each triangle references the normal with the same index.
pub fn write_obj<W: Write>(mesh: &MeshBuffers, mut out: W) -> io::Result<()> {
    writeln!(out, "# blockface mesh: {} faces", mesh.face_count())?;
    for p in mesh.positions().chunks_exact(3) {
        writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for n in mesh.normals().chunks_exact(3) {
        writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
    }
    for tri in mesh.indices().chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    out.flush()
}

pub fn write_obj_file(mesh: &MeshBuffers, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_obj(mesh, BufWriter::new(file))
}

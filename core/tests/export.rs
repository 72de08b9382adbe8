//! End-to-end export tests: scene snapshot in, parsed document out.

use xmltree::{Element, XMLNode};

use xml3d_core::material::{DEFAULT_MATERIAL_NAME, PHONG_SCRIPT};
use xml3d_core::scene::{
    Image, ImageSource, MaterialDescriptor, ObjectKind, Scene, SceneObject, SourceFace,
    SourceMesh, SourceVertex, Texture, TextureCoords, TextureKind, TextureSlot,
};
use xml3d_core::{AssetExporter, ExportConfig, ExportStats};

// ---------------------------------------------------------------------------
// Scene builders
// ---------------------------------------------------------------------------

fn quad_vertices() -> Vec<SourceVertex> {
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        .iter()
        .map(|&[x, y]| SourceVertex {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
        })
        .collect()
}

fn quad_mesh(name: &str, materials: Vec<Option<String>>) -> SourceMesh {
    SourceMesh {
        name: name.into(),
        vertices: quad_vertices(),
        faces: vec![SourceFace {
            vertices: vec![0, 1, 2, 3],
            normal: [0.0, 0.0, 1.0],
            smooth: false,
            material_index: 0,
        }],
        materials,
        uv_layer: None,
    }
}

fn red_material() -> MaterialDescriptor {
    MaterialDescriptor {
        name: "Red".into(),
        diffuse_color: [1.0, 0.0, 0.0],
        diffuse_intensity: 0.8,
        specular_color: [1.0, 1.0, 1.0],
        specular_intensity: 0.5,
        specular_hardness: 50.0,
        ambient: 1.0,
        texture_slots: Vec::new(),
    }
}

fn object(mesh: SourceMesh) -> SceneObject {
    SceneObject {
        name: format!("{}Object", mesh.name),
        kind: ObjectKind::Mesh,
        mesh: Some(mesh),
    }
}

fn export(scene: &Scene) -> (String, ExportStats) {
    let mut exporter = AssetExporter::new("out/asset.xml", "scenes", ExportConfig::default());
    exporter.add_scene(scene);
    let mut buffer = Vec::new();
    let mut stats = ExportStats::default();
    exporter.write_to(&mut buffer, &mut stats).unwrap();
    (String::from_utf8(buffer).unwrap(), stats)
}

fn parse(document: &str) -> Element {
    Element::parse(document.as_bytes()).expect("exported document must be well-formed")
}

fn elements<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    parent
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(move |e| e.name == name)
}

fn attr<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attributes.get(name).map(String::as_str)
}

fn content<'a>(parent: &'a Element, tag: &str, name: &str) -> Option<&'a Element> {
    parent
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .find(|e| e.name == tag && attr(e, "name") == Some(name))
}

fn numbers(element: &Element) -> Vec<String> {
    element
        .get_text()
        .map(|t| t.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn single_quad_with_one_material() {
    let scene = Scene {
        name: None,
        materials: vec![red_material()],
        objects: vec![object(quad_mesh("Quad", vec![Some("Red".into())]))],
    };

    let (document, stats) = export(&scene);
    let root = parse(&document);
    assert_eq!(root.name, "xml3d");

    let shaders: Vec<_> = elements(&root, "shader").collect();
    assert_eq!(shaders.len(), 1);
    assert_eq!(attr(shaders[0], "id"), Some("Red"));
    assert_eq!(attr(shaders[0], "script"), Some(PHONG_SCRIPT));
    assert!(attr(shaders[0], "compute").is_some());
    let diffuse = content(shaders[0], "float3", "diffuse_color").unwrap();
    assert_eq!(numbers(diffuse), ["1.000000", "0.000000", "0.000000"]);
    let hardness = content(shaders[0], "float", "specular_hardness").unwrap();
    assert_eq!(numbers(hardness), ["50.0"]);

    let asset = elements(&root, "asset").next().unwrap();
    assert_eq!(attr(asset, "id"), Some("root"));

    let data: Vec<_> = elements(asset, "assetdata").collect();
    assert_eq!(data.len(), 1);
    assert_eq!(attr(data[0], "name"), Some("Quad"));
    let positions = content(data[0], "float3", "position").unwrap();
    let normals = content(data[0], "float3", "normal").unwrap();
    assert_eq!(numbers(positions).len(), 4 * 3);
    assert_eq!(numbers(normals).len(), 4 * 3);
    assert!(content(data[0], "float2", "texcoord").is_none());

    let meshes: Vec<_> = elements(asset, "assetmesh").collect();
    assert_eq!(meshes.len(), 1);
    assert_eq!(attr(meshes[0], "name"), Some("Quad_Red"));
    assert_eq!(attr(meshes[0], "includes"), Some("Quad"));
    assert_eq!(attr(meshes[0], "shader"), Some("#Red"));
    let index = content(meshes[0], "int", "index").unwrap();
    assert_eq!(numbers(index), ["0", "1", "2", "2", "3", "0"]);

    assert_eq!(stats.materials, 1);
    assert_eq!(stats.meshes, vec!["Quad_Red".to_string()]);
    assert_eq!(stats.textures, 0);
}

#[test]
fn re_export_is_byte_identical() {
    let scene = Scene {
        name: None,
        materials: vec![red_material()],
        objects: vec![
            object(quad_mesh("A", vec![Some("Red".into())])),
            object(quad_mesh("B", vec![])),
        ],
    };

    let (first, _) = export(&scene);
    let (second, _) = export(&scene);
    assert_eq!(first, second);
}

#[test]
fn default_material_written_once() {
    let scene = Scene {
        name: None,
        materials: vec![],
        objects: vec![
            object(quad_mesh("A", vec![])),
            object(quad_mesh("B", vec![None])),
            object(quad_mesh("C", vec![Some("Missing".into())])),
        ],
    };

    let (document, stats) = export(&scene);
    let root = parse(&document);

    let shaders: Vec<_> = elements(&root, "shader").collect();
    assert_eq!(shaders.len(), 1);
    assert_eq!(attr(shaders[0], "id"), Some(DEFAULT_MATERIAL_NAME));
    assert!(attr(shaders[0], "compute").is_none());

    let asset = elements(&root, "asset").next().unwrap();
    assert!(elements(asset, "assetmesh")
        .all(|m| attr(m, "shader") == Some("#defaultMaterial")));
    assert_eq!(
        stats.meshes,
        ["A_defaultMaterial", "B_defaultMaterial", "C_defaultMaterial"]
    );
}

#[test]
fn submeshes_per_material_share_mesh_data() {
    let mut mesh = quad_mesh("Split", vec![Some("Red".into()), None]);
    mesh.vertices.push(SourceVertex {
        position: [2.0, 0.0, 0.0],
        normal: [0.0, 0.0, 1.0],
    });
    mesh.faces.push(SourceFace {
        vertices: vec![1, 4, 2],
        normal: [0.0, 0.0, 1.0],
        smooth: false,
        material_index: 1,
    });
    let scene = Scene {
        name: None,
        materials: vec![red_material()],
        objects: vec![object(mesh)],
    };

    let (document, _) = export(&scene);
    let root = parse(&document);
    let asset = elements(&root, "asset").next().unwrap();

    let data: Vec<_> = elements(asset, "assetdata").collect();
    assert_eq!(data.len(), 1);
    let vertex_count = numbers(content(data[0], "float3", "position").unwrap()).len() / 3;
    assert_eq!(vertex_count, 5);

    let meshes: Vec<_> = elements(asset, "assetmesh").collect();
    assert_eq!(meshes.len(), 2);
    assert_eq!(attr(meshes[0], "shader"), Some("#Red"));
    assert_eq!(attr(meshes[1], "shader"), Some("#defaultMaterial"));
    for mesh in meshes {
        assert_eq!(attr(mesh, "includes"), Some("Split"));
        let indices = numbers(content(mesh, "int", "index").unwrap());
        assert_eq!(indices.len() % 3, 0);
        assert!(indices
            .iter()
            .all(|i| i.parse::<usize>().unwrap() < vertex_count));
    }

    let ids: Vec<_> = elements(&root, "shader").filter_map(|s| attr(s, "id")).collect();
    assert_eq!(ids, ["Red", "defaultMaterial"]);
}

#[test]
fn uv_seams_split_vertices() {
    let mut mesh = quad_mesh("Uv", vec![]);
    mesh.faces = vec![
        SourceFace {
            vertices: vec![0, 1, 2],
            normal: [0.0, 0.0, 1.0],
            smooth: true,
            material_index: 0,
        },
        SourceFace {
            vertices: vec![2, 3, 0],
            normal: [0.0, 0.0, 1.0],
            smooth: true,
            material_index: 0,
        },
    ];
    // vertex 0 gets a different UV in the second face
    mesh.uv_layer = Some(vec![
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
        vec![[1.0, 1.0], [0.0, 1.0], [0.5, 0.5]],
    ]);
    let scene = Scene {
        name: None,
        materials: vec![],
        objects: vec![object(mesh)],
    };

    let (document, _) = export(&scene);
    let root = parse(&document);
    let asset = elements(&root, "asset").next().unwrap();
    let data = elements(asset, "assetdata").next().unwrap();

    let positions = numbers(content(data, "float3", "position").unwrap());
    let texcoords = numbers(content(data, "float2", "texcoord").unwrap());
    assert_eq!(positions.len() / 3, 5);
    assert_eq!(texcoords.len() / 2, 5);

    let mesh = elements(asset, "assetmesh").next().unwrap();
    assert_eq!(
        numbers(content(mesh, "int", "index").unwrap()),
        ["0", "1", "2", "2", "3", "4"]
    );
}

#[test]
fn unusable_objects_are_skipped() {
    let mut broken = quad_mesh("Broken", vec![]);
    broken.faces[0].vertices = vec![0, 1, 9];
    let mut empty = quad_mesh("Empty", vec![]);
    empty.faces.clear();
    let mut pentagon = quad_mesh("Pentagon", vec![]);
    pentagon.faces[0].vertices = vec![0, 1, 2, 3, 0];

    let scene = Scene {
        name: None,
        materials: vec![],
        objects: vec![
            SceneObject {
                name: "Lamp".into(),
                kind: ObjectKind::Lamp,
                mesh: None,
            },
            SceneObject {
                name: "Text".into(),
                kind: ObjectKind::Font,
                mesh: None,
            },
            object(broken),
            object(empty),
            object(pentagon),
            object(quad_mesh("Good", vec![])),
            object(quad_mesh("Good", vec![])),
        ],
    };

    let (document, stats) = export(&scene);
    let root = parse(&document);
    let asset = elements(&root, "asset").next().unwrap();

    let names: Vec<_> = elements(asset, "assetdata")
        .filter_map(|d| attr(d, "name"))
        .collect();
    // unsupported faces emit no indices, but their mesh data is kept
    assert_eq!(names, ["Pentagon", "Good"]);
    assert_eq!(stats.meshes, ["Good_defaultMaterial"]);
}

#[test]
fn save_writes_file_and_copies_textures() {
    let dir = tempfile::tempdir().unwrap();
    let scene_dir = dir.path().join("scenes");
    let export_dir = dir.path().join("export").join("assets");
    std::fs::create_dir_all(scene_dir.join("img")).unwrap();
    std::fs::create_dir_all(&export_dir).unwrap();
    std::fs::write(scene_dir.join("img").join("brick.png"), b"not really a png").unwrap();

    let mut material = red_material();
    material.texture_slots = vec![
        Some(TextureSlot {
            name: "Brick".into(),
            enabled: true,
            use_map_color_diffuse: true,
            diffuse_color_factor: 1.0,
            texture_coords: TextureCoords::Uv,
            texture: Texture {
                kind: TextureKind::Image,
                image: Some(Image {
                    name: "brick".into(),
                    source: ImageSource::File,
                    filepath: "//img/brick.png".into(),
                    packed_data: None,
                }),
            },
        }),
        Some(TextureSlot {
            name: "Packed".into(),
            enabled: true,
            use_map_color_diffuse: true,
            diffuse_color_factor: 0.5,
            texture_coords: TextureCoords::Uv,
            texture: Texture {
                kind: TextureKind::Image,
                image: Some(Image {
                    name: "packed".into(),
                    source: ImageSource::File,
                    filepath: String::new(),
                    packed_data: Some(b"png".to_vec()),
                }),
            },
        }),
    ];
    let scene = Scene {
        name: None,
        materials: vec![material],
        objects: vec![object(quad_mesh("Quad", vec![Some("Red".into())]))],
    };

    let output = export_dir.join("scene.xml");
    let mut exporter = AssetExporter::new(&output, &scene_dir, ExportConfig::default());
    exporter.add_scene(&scene);
    assert_eq!(exporter.pending_copies().len(), 1);
    let stats = exporter.save().unwrap();

    let document = std::fs::read_to_string(&output).unwrap();
    assert_eq!(stats.assets.len(), 1);
    assert_eq!(stats.assets[0].size, Some(document.len() as u64));
    assert_eq!(stats.textures, 2);

    let root = parse(&document);
    let shader = elements(&root, "shader").next().unwrap();
    let sources: Vec<_> = elements(shader, "texture")
        .map(|t| {
            assert_eq!(attr(t, "name"), Some("diffuseTexture"));
            attr(t.get_child("img").unwrap(), "src").unwrap().to_string()
        })
        .collect();
    assert_eq!(sources, ["../textures/brick.png", "data:image/png;base64,cG5n"]);

    let copied = dir.path().join("export").join("textures").join("brick.png");
    assert_eq!(std::fs::read(copied).unwrap(), b"not really a png");
    assert!(exporter.pending_copies().is_empty());
}

#[test]
fn save_fails_when_destination_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("scene.xml");
    let mut exporter = AssetExporter::new(&output, dir.path(), ExportConfig::default());
    exporter.add_mesh(&quad_mesh("Quad", vec![]), &[]);
    assert!(exporter.save().is_err());
}

#[test]
fn save_keeps_document_when_texture_copy_is_denied() {
    let dir = tempfile::tempdir().unwrap();
    let scene_dir = dir.path().join("scenes");
    let export_dir = dir.path().join("export");
    std::fs::create_dir_all(&scene_dir).unwrap();
    std::fs::create_dir_all(&export_dir).unwrap();
    std::fs::write(scene_dir.join("brick.png"), b"png").unwrap();

    let mut material = red_material();
    material.texture_slots = vec![Some(TextureSlot {
        name: "Brick".into(),
        enabled: true,
        use_map_color_diffuse: true,
        diffuse_color_factor: 1.0,
        texture_coords: TextureCoords::Uv,
        texture: Texture {
            kind: TextureKind::Image,
            image: Some(Image {
                name: "brick".into(),
                source: ImageSource::File,
                filepath: "//brick.png".into(),
                packed_data: None,
            }),
        },
    })];
    let scene = Scene {
        name: None,
        materials: vec![material],
        objects: vec![object(quad_mesh("Quad", vec![Some("Red".into())]))],
    };

    let output = export_dir.join("scene.xml");
    let mut exporter = AssetExporter::new(&output, &scene_dir, ExportConfig::default());
    exporter.set_copy_fn(|_, _| Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied)));
    exporter.add_scene(&scene);

    let mut expected = Vec::new();
    exporter
        .write_to(&mut expected, &mut ExportStats::default())
        .unwrap();

    let stats = exporter.save().unwrap();

    let written = std::fs::read(&output).unwrap();
    assert_eq!(written, expected);
    assert_eq!(stats.assets[0].size, Some(written.len() as u64));
    assert_eq!(exporter.pending_copies().len(), 1);
    assert!(!dir.path().join("textures").join("brick.png").exists());
}

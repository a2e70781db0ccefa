use clap::Parser;

use hello_gl::app::App;
use hello_gl::args::Args;
use hello_gl::geometry::{GeometryBuilder, VertexAttribute};
use hello_gl::shader::ProgramBuilder;
use hello_gl::QUAD;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    let app = match App::new("Hello Quad", args.width, args.height) {
        Ok(a) => a,
        Err(e) => {
            println!("{e}");
            std::process::exit(-1);
        }
    };

    let geometry = match GeometryBuilder::new(&QUAD)
        .with_attribute(VertexAttribute::Vec3)
        .build()
    {
        Ok(g) => g,
        Err(e) => {
            println!("{e}");
            std::process::exit(-1);
        }
    };

    let program = ProgramBuilder::from_sources(
        include_str!("../gl_shaders/position.glsl"),
        include_str!("../gl_shaders/orange.glsl"),
    )
    .and_then(ProgramBuilder::link);

    let program = match program {
        Ok(p) => p,
        Err(e) => {
            println!("{e}");
            std::process::exit(-1);
        }
    };

    app.run(geometry, program);
}

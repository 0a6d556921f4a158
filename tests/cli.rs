use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn tsx() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_docstring2tsx")))
}

fn md() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_docstring2md")))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `shop` package with one documented module, one private module, and one
/// module that does not parse.
fn package() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "shop/__init__.py", "");
    write(
        root,
        "shop/cart.py",
        r#""""Shopping cart."""


class Cart:
    """Items waiting for checkout.

    Args:
        owner (str): Customer id.
        limit: Maximum <items> per cart.
    """

    def __init__(self, owner, limit=10):
        self.owner = owner


def total(cart: Cart, discount: float = 0.0) -> float:
    """Sum the cart.

    Examples:
        >>> total(Cart("a"))
        0.0
    """
"#,
    );
    write(root, "shop/_pricing.py", "def price():\n    pass\n");
    write(root, "shop/broken.py", "class Oops(\n");
    dir
}

#[test]
fn tsx_writes_pages_and_survives_bad_module() {
    let src = package();
    let out = TempDir::new().unwrap();

    tsx()
        .current_dir(src.path())
        .env_remove("DOCPAGES_CONFIG")
        .args(["--package-name", "shop", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("2 written, 1 skipped, 1 failed"));

    let page = fs::read_to_string(out.path().join("cart/page.tsx")).unwrap();
    assert!(page.starts_with("import { ModuleDoc } from '@/components/DocComponents';"));
    assert!(page.contains("\"moduleName\": \"shop.cart\""));
    assert!(page.contains("\"description\": \"Maximum <items> per cart.\""));
    assert!(out.path().join("_pricing/page.tsx").is_file());
    assert!(!out.path().join("broken").exists());
}

#[test]
fn markdown_excludes_private_modules() {
    let src = package();
    let out = TempDir::new().unwrap();

    md()
        .current_dir(src.path())
        .env_remove("DOCPAGES_CONFIG")
        .args(["--package-name", "shop", "--exclude-private", "--output-dir"])
        .arg(out.path())
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("cart/page.md")).unwrap();
    assert!(page.starts_with("# shop.cart\n\nShopping cart.\n"));
    assert!(page.contains("<a id=\"shop-cart-cart\"></a>"));
    assert!(page.contains("- **limit** (default: `10`): Maximum \\<items\\> per cart."));
    assert!(page.contains("```python\n>>> total(Cart(\"a\"))\n0.0\n```"));
    assert!(!out.path().join("_pricing").exists());
}

#[test]
fn project_config_file_is_honored() {
    let src = package();
    let out = TempDir::new().unwrap();
    write(
        src.path(),
        "docpages.toml",
        "components_import_path = \"~/docs/Module\"\ninclude_source = false\n",
    );

    tsx()
        .current_dir(src.path())
        .env_remove("DOCPAGES_CONFIG")
        .args(["--package-name", "shop", "--output-dir"])
        .arg(out.path())
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("cart/page.tsx")).unwrap();
    assert!(page.starts_with("import { ModuleDoc } from '~/docs/Module';"));
    assert!(!page.contains("source_code"));
}

#[test]
fn missing_package_fails() {
    let src = package();
    let out = TempDir::new().unwrap();

    md()
        .current_dir(src.path())
        .env_remove("DOCPAGES_CONFIG")
        .args(["--package-name", "warehouse", "--output-dir"])
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn only_documented_flags_are_accepted() {
    tsx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--package-name"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--exclude-private"));

    md()
        .args(["--package-name", "shop", "--output-dir", "out", "--format", "tsx"])
        .assert()
        .failure();
}

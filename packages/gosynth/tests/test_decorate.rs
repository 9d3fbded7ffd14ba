//! Decorate end to end over the shop fixture module

mod common;

use common::*;
use gosynth::usecases::decorate;
use pretty_assertions::assert_eq;

#[test]
fn test_layer_proxy_output() {
    let root = shop_module();
    decorate(root.path(), &test_config()).unwrap();

    let proxy = read_output(root.path(), "build/internal/handler/handler.go");
    assert_eq!(
        proxy,
        r#"package handler

import (
	"context"

	_handler "example.com/shop/internal/handler"
)

type handler struct {
	delegate _handler.Handler
}

func NewHandler(prefix string) (_handler.Handler, error) {
	delegate, err := _handler.NewHandler(prefix)
	if err != nil {
		return nil, err
	}
	return &handler{delegate: delegate}, nil
}

func (h *handler) Get(ctx context.Context, id string) (string, error) {
	return h.delegate.Get(ctx, id)
}

func (h *handler) Notify(ids ...string) {
	h.delegate.Notify(ids...)
}
"#
    );
}

#[test]
fn test_proxy_has_single_delegate_and_one_method_per_interface_method() {
    let root = shop_module();
    decorate(root.path(), &test_config()).unwrap();

    let proxy = read_output(root.path(), "build/internal/handler/handler.go");
    let struct_body = proxy
        .split("type handler struct {\n")
        .nth(1)
        .and_then(|rest| rest.split("\n}").next())
        .unwrap();
    assert_eq!(struct_body.lines().count(), 1);
    assert_eq!(proxy.matches("func (h *handler) ").count(), 2);
}

#[test]
fn test_empty_layer_file_keeps_package_clause() {
    let root = shop_module();
    decorate(root.path(), &test_config()).unwrap();

    assert_eq!(
        read_output(root.path(), "build/internal/handler/doc.go"),
        "package handler\n"
    );
}

#[test]
fn test_entry_package_is_rewired() {
    let root = shop_module();
    decorate(root.path(), &test_config()).unwrap();

    let main = read_output(root.path(), "build/cmd/server/main.go");
    assert_eq!(
        main,
        r#"package main

import (
	"context"
	"fmt"

	_ "example.com/shop/internal/handler"
	_handler "example.com/shop/build/internal/handler"
)

func main() {
	h, err := _handler.NewHandler("user-")
	if err != nil {
		panic(err)
	}
	fmt.Println(h.Get(context.Background(), "1"))
}
"#
    );
}

#[test]
fn test_plain_packages_and_sources_are_untouched() {
    let root = shop_module();
    let summary = decorate(root.path(), &test_config()).unwrap();

    assert!(!root.path().join("build/internal/lookup").exists());
    assert_eq!(read_output(root.path(), "internal/handler/handler.go"), HANDLER_GO);
    assert_eq!(read_output(root.path(), "cmd/server/main.go"), MAIN_GO);
    assert_eq!(summary.module, SHOP_MODULE);
    assert_eq!(summary.files_written.len(), 3);
}

#[test]
fn test_decorated_files_reparse() {
    let root = shop_module();
    let summary = decorate(root.path(), &test_config()).unwrap();
    for path in &summary.files_written {
        assert_parses(path);
    }
}

#[test]
fn test_decorate_is_idempotent() {
    let root = shop_module();
    decorate(root.path(), &test_config()).unwrap();
    let first = snapshot(&root.path().join("build"));

    decorate(root.path(), &test_config()).unwrap();
    let second = snapshot(&root.path().join("build"));

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_ungrouped_entry_import() {
    let root = ModuleBuilder::new("example.com/app")
        .file(
            "main.go",
            "package main\n\nimport \"example.com/app/gateway\"\n\nfunc main() {\n\t_ = gateway.New()\n}\n",
        )
        .file(
            "gateway/gateway.go",
            "package gateway\n\n\
             type Gateway interface {\n\tOpen() error\n}\n\n\
             type gateway struct{}\n\n\
             func New() Gateway {\n\treturn &gateway{}\n}\n\n\
             func (g *gateway) Open() error {\n\treturn nil\n}\n",
        )
        .build();
    decorate(root.path(), &test_config()).unwrap();

    assert_eq!(
        read_output(root.path(), "build/main.go"),
        "package main\n\n\
         import _ \"example.com/app/gateway\"\n\
         import _gateway \"example.com/app/build/gateway\"\n\n\
         func main() {\n\t_ = _gateway.New()\n}\n"
    );
    assert_contains_all(
        &read_output(root.path(), "build/gateway/gateway.go"),
        &[
            "func New() _gateway.Gateway {",
            "func (g *gateway) Open() error {\n\treturn g.delegate.Open()\n}",
        ],
    );
}

#[test]
fn test_entry_test_files_follow_config() {
    let root = ModuleBuilder::new(SHOP_MODULE)
        .file("cmd/server/main.go", MAIN_GO)
        .file("cmd/server/main_test.go", MAIN_TEST_GO)
        .file("internal/handler/handler.go", HANDLER_GO)
        .build();

    decorate(root.path(), &test_config()).unwrap();
    assert!(!root.path().join("build/cmd/server/main_test.go").exists());

    let config = test_config().with_skip_test_files(false);
    decorate(root.path(), &config).unwrap();
    assert_contains_all(
        &read_output(root.path(), "build/cmd/server/main_test.go"),
        &[
            "\t_ \"example.com/shop/internal/handler\"\n",
            "\t_handler \"example.com/shop/build/internal/handler\"\n",
            "_handler.NewHandler(\"\")",
        ],
    );
    assert!(!root.path().join("build/internal/handler/handler_test.go").exists());
}
